pub mod candidate_extractor;
pub mod dependency_matcher;

pub use candidate_extractor::CandidateExtractor;
pub use dependency_matcher::DependencyMatcher;
