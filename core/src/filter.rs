//! Displayed subsets of the todo list.

use std::fmt;
use std::str::FromStr;

use crate::types::Todo;

/// Which todos a view shows. `All` hides trashed items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Unchecked,
    Delete,
}

impl Filter {
    pub fn matches(&self, todo: &Todo) -> bool {
        match self {
            Filter::All => !todo.delete_flg,
            Filter::Completed => todo.completed_flg && !todo.delete_flg,
            Filter::Unchecked => !todo.completed_flg && !todo.delete_flg,
            Filter::Delete => todo.delete_flg,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Unchecked => "unchecked",
            Filter::Delete => "delete",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the names `Display` produces; `trash` is accepted for `Delete`.
impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "unchecked" => Ok(Filter::Unchecked),
            "delete" | "trash" => Ok(Filter::Delete),
            other => Err(format!("unknown filter: {other}")),
        }
    }
}

/// The todos matching `mode`, in list order.
pub fn filter(items: &[Todo], mode: Filter) -> Vec<&Todo> {
    items.iter().filter(|todo| mode.matches(todo)).collect()
}
