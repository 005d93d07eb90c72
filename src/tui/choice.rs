//! Entries shown by the list prompt.

use std::fmt::Display;

/// Default separator line (dimmed when rendered).
pub const SEPARATOR_LINE: &str = "───────────────";

/// Decides whether a choice value can be returned from a selection.
///
/// Empty strings and zero numbers count as "nothing to return", so a choice
/// carrying one is treated like a disabled row.
pub trait PromptValue {
    fn is_truthy(&self) -> bool;
}

impl PromptValue for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl PromptValue for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl PromptValue for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl<T: PromptValue> PromptValue for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(PromptValue::is_truthy)
    }
}

macro_rules! numeric_prompt_value {
    ($($t:ty),*) => {
        $(impl PromptValue for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

numeric_prompt_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Why a choice cannot be selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disabled {
    /// Disabled without a reason; rendered as `(disabled)`.
    Flag,
    /// Disabled with a label rendered next to the name.
    Reason(String),
}

impl Disabled {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Flag => "(disabled)",
            Self::Reason(reason) => reason,
        }
    }
}

/// A selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<V> {
    pub value: V,
    pub name: String,
    pub description: Option<String>,
    pub disabled: Option<Disabled>,
}

impl<V: Display> Choice<V> {
    /// Create a choice whose name is the value's display form.
    pub fn new(value: V) -> Self {
        let name = value.to_string();
        Self {
            value,
            name,
            description: None,
            disabled: None,
        }
    }

    /// Create a choice with an explicit display name. An empty name falls
    /// back to the value's display form.
    pub fn named(value: V, name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            return Self::new(value);
        }
        Self {
            value,
            name,
            description: None,
            disabled: None,
        }
    }
}

impl<V> Choice<V> {
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = Some(Disabled::Flag);
        self
    }

    #[must_use]
    pub fn disabled_because(mut self, reason: impl Into<String>) -> Self {
        self.disabled = Some(Disabled::Reason(reason.into()));
        self
    }

    /// Case-insensitive substring match against name or description.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// One row of the list: a choice or a divider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<V> {
    Choice(Choice<V>),
    Separator(String),
}

impl<V> Entry<V> {
    /// A separator with the default line.
    #[must_use]
    pub fn separator() -> Self {
        Self::Separator(SEPARATOR_LINE.to_string())
    }

    /// Not a separator and not disabled.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Choice(c) if c.disabled.is_none())
    }

    #[must_use]
    pub fn as_choice(&self) -> Option<&Choice<V>> {
        match self {
            Self::Choice(c) => Some(c),
            Self::Separator(_) => None,
        }
    }
}

impl<V> From<Choice<V>> for Entry<V> {
    fn from(choice: Choice<V>) -> Self {
        Self::Choice(choice)
    }
}
