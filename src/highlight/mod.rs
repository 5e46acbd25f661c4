pub(crate) mod theme;
pub(crate) mod token;
pub(crate) mod tokenizer;
