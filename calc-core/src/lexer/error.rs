use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    InvalidNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Unrecognized character", vec![format!("`{}` is not part of any token", tok.escape_debug())])
            },
            LexicalErrorType::InvalidNumber => {
                ("Malformed number literal", vec![])
            }
        }
    }
}
