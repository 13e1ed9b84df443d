/// Use cases module containing application business logic orchestration
mod collect_clients;

pub use collect_clients::CollectClientsUseCase;
