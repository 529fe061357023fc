//! Spending categories assigned to transactions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category label attached to every ingested transaction.
///
/// Serialized as its display label (`"Food & Dining"`), so user-defined
/// categories round-trip through storage as plain strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
pub enum Category {
    Income,
    Investments,
    Housing,
    Transportation,
    FoodAndDining,
    Shopping,
    BillsAndUtilities,
    Insurance,
    Healthcare,
    Entertainment,
    Education,
    LoanPayment,
    Emi,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    /// Every built-in category, in chart order.
    pub const BUILTIN: [Category; 14] = [
        Category::Income,
        Category::Investments,
        Category::Housing,
        Category::BillsAndUtilities,
        Category::Transportation,
        Category::Insurance,
        Category::Healthcare,
        Category::FoodAndDining,
        Category::Shopping,
        Category::Entertainment,
        Category::Education,
        Category::LoanPayment,
        Category::Emi,
        Category::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Income => "Income",
            Category::Investments => "Investments",
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::FoodAndDining => "Food & Dining",
            Category::Shopping => "Shopping",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Insurance => "Insurance",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::Education => "Education",
            Category::LoanPayment => "Loan Payment",
            Category::Emi => "EMI",
            Category::Other => "Other",
            Category::Custom(name) => name,
        }
    }

    /// Chart colour (hex) for this category. Custom labels share Other's grey.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Income => "#4CAF50",
            Category::Investments => "#2196F3",
            Category::Housing => "#9C27B0",
            Category::BillsAndUtilities => "#FF9800",
            Category::Transportation => "#F44336",
            Category::Insurance => "#3F51B5",
            Category::Healthcare => "#E91E63",
            Category::FoodAndDining => "#009688",
            Category::Shopping => "#FF5722",
            Category::Entertainment => "#673AB7",
            Category::Education => "#00BCD4",
            Category::LoanPayment => "#795548",
            Category::Emi => "#607D8B",
            Category::Other | Category::Custom(_) => "#9E9E9E",
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }

    /// Resolve a label to a category. Built-in labels match case-insensitively,
    /// along with a few legacy spellings; anything else becomes `Custom`.
    pub fn from_label(label: &str) -> Category {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "income" => Category::Income,
            "investments" | "investment" => Category::Investments,
            "housing" | "rent" => Category::Housing,
            "transportation" => Category::Transportation,
            "food & dining" | "food" => Category::FoodAndDining,
            "shopping" => Category::Shopping,
            "bills & utilities" | "utilities" => Category::BillsAndUtilities,
            "insurance" => Category::Insurance,
            "healthcare" | "medical" => Category::Healthcare,
            "entertainment" => Category::Entertainment,
            "education" => Category::Education,
            "loan payment" => Category::LoanPayment,
            "emi" => Category::Emi,
            "other" | "miscellaneous" | "" => Category::Other,
            _ => Category::Custom(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(name) => name,
            builtin => builtin.label().to_string(),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from_label(label)
    }
}
