//! Creation forms for the three collections.
//!
//! A form owns its raw input and a busy flag. The busy flag is the only guard
//! against duplicate submissions: while it is set the form refuses input and
//! a second submit.

use api_types::item::{AssetNew, DebtNew, ItemKind, StockNew};
use thiserror::Error;

const BUSY_LABEL: &str = "Adding...";

/// A validated create request, ready to be sent.
#[derive(Debug)]
pub enum Draft {
    Asset(AssetNew),
    Debt(DebtNew),
    Stock(StockNew),
}

impl Draft {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Asset(_) => ItemKind::Asset,
            Self::Debt(_) => ItemKind::Debt,
            Self::Stock(_) => ItemKind::Stock,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// Name for assets and debts, symbol for stocks.
    Text,
    /// Value for assets, amount for debts, shares for stocks.
    Number,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Text, Field::Number];
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("already submitting")]
    Busy,
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
}

#[derive(Debug, Clone)]
pub struct CreateForm {
    kind: ItemKind,
    text: String,
    number: String,
    busy: bool,
    error: Option<String>,
}

impl CreateForm {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            text: String::new(),
            number: String::new(),
            busy: false,
            error: None,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Inline constraint message from the last rejected submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Text => &self.text,
            Field::Number => &self.number,
        }
    }

    /// Mutable access to a field; `None` while a submission is in flight.
    pub fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        if self.busy {
            return None;
        }
        self.error = None;
        Some(match field {
            Field::Text => &mut self.text,
            Field::Number => &mut self.number,
        })
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ItemKind::Asset => "Add Asset",
            ItemKind::Debt => "Add Debt",
            ItemKind::Stock => "Add Stock",
        }
    }

    pub fn label(&self, field: Field) -> &'static str {
        match (self.kind, field) {
            (ItemKind::Asset, Field::Text) => "Asset Name",
            (ItemKind::Asset, Field::Number) => "Value",
            (ItemKind::Debt, Field::Text) => "Debt Name",
            (ItemKind::Debt, Field::Number) => "Amount",
            (ItemKind::Stock, Field::Text) => "Stock Symbol",
            (ItemKind::Stock, Field::Number) => "Shares",
        }
    }

    pub fn placeholder(&self, field: Field) -> &'static str {
        match (self.kind, field) {
            (ItemKind::Asset, Field::Text) => "e.g., Savings Account",
            (ItemKind::Debt, Field::Text) => "e.g., Credit Card",
            (ItemKind::Stock, Field::Text) => "e.g., AAPL",
            (ItemKind::Stock, Field::Number) => "Number of shares",
            (_, Field::Number) => "0.00",
        }
    }

    /// Label of the submit control; swapped while busy.
    pub fn submit_label(&self) -> &'static str {
        if self.busy { BUSY_LABEL } else { self.title() }
    }

    /// Checks the form constraints and marks the form busy.
    ///
    /// On a constraint failure the input is kept and the message is stored
    /// for inline display.
    pub fn begin_submit(&mut self) -> Result<Draft, FormError> {
        if self.busy {
            return Err(FormError::Busy);
        }

        let draft = match self.draft() {
            Ok(draft) => draft,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.busy = true;
        self.error = None;
        Ok(draft)
    }

    /// Completion of a submission, successful or not: clears the input and
    /// re-enables the form.
    pub fn finish(&mut self) {
        self.text.clear();
        self.number.clear();
        self.busy = false;
    }

    fn draft(&self) -> Result<Draft, FormError> {
        // Only a truly empty name is missing; whitespace is kept as typed.
        if self.text.is_empty() {
            return Err(FormError::Missing(self.label(Field::Text)));
        }

        let number_label = self.label(Field::Number);
        let number = self.number.trim();
        if number.is_empty() {
            return Err(FormError::Missing(number_label));
        }
        let number = number
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or(FormError::NotANumber(number_label))?;

        let draft = match self.kind {
            ItemKind::Asset => Draft::Asset(AssetNew {
                name: self.text.clone(),
                value: number,
            }),
            ItemKind::Debt => Draft::Debt(DebtNew {
                name: self.text.clone(),
                value: number,
            }),
            ItemKind::Stock => Draft::Stock(StockNew {
                symbol: self.text.to_uppercase(),
                shares: number,
            }),
        };
        Ok(draft)
    }
}
