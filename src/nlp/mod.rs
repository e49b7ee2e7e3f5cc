// Text processing stages of the summarization pipeline
pub mod abstractive;
pub mod chunker;
pub mod concurrent;
pub mod condenser;
pub mod correction;
pub mod dictionary;
pub mod frequency;
pub mod lsa;
pub mod selector;
pub mod stopwords;
pub mod tokenize;

pub use abstractive::{Abstractor, OllamaAbstractor, Passthrough};
pub use chunker::split_text;
pub use concurrent::{process_concurrently, FanOut};
pub use condenser::condense;
pub use correction::correct_summary;
pub use dictionary::{Dictionary, WordListDictionary};
pub use frequency::{score_sentences, FrequencyTable, SentenceScores};
pub use lsa::{rank_sentences, select_best};
pub use selector::{join_selected, select_top};
