use thiserror::Error;

use crate::expression::TreeError;
use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Tree expansion error: {0}")]
    Tree(#[from] TreeError),
    #[error("Utils error: {0}")]
    Utils(#[from] UtilsError),
}
