//! Deterministic keyword rules mapping statement narrations to categories.
//!
//! The rule table is an ordered list: the first keyword found in the
//! description decides the category. When no keyword matches, a few
//! debit/credit heuristics run before falling back to `Other`.

use std::sync::LazyLock;

use passbook_core::Category;
use regex::Regex;

/// One keyword → category mapping. Keywords are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub keyword: String,
    pub category: Category,
}

/// Ordered, immutable categorization rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

static BUILTIN_RULES: LazyLock<RuleTable> = LazyLock::new(|| {
    use Category::*;

    let groups: [(Category, &[&str]); 11] = [
        (
            Investments,
            &[
                "zerodha", "groww", "upstox", "mutual fund", "stocks", "demat", "trading",
                "bse", "nse",
            ],
        ),
        (
            Housing,
            &[
                "rent", "mortgage", "apartment", "property", "maintenance", "society",
                "electricity", "power", "water", "gas",
            ],
        ),
        (
            Transportation,
            &[
                "uber", "olacabs", "ola cabs", "rapido", "metro", "train", "irctc",
                "railway", "parking", "petrol", "diesel", "fuel", "fastag",
            ],
        ),
        (
            FoodAndDining,
            &[
                "swiggy", "zomato", "restaurant", "cafe", "coffee", "hotel", "food",
                "grocery", "bigbasket", "blinkit", "zepto", "dunzo", "instamart", "dmart",
                "nature basket",
            ],
        ),
        (
            Shopping,
            &["amazon", "flipkart", "myntra", "ajio", "meesho", "mall", "retail"],
        ),
        (
            BillsAndUtilities,
            &[
                "airtel", "jio", "vodafone", "mobile", "broadband", "wifi", "internet",
                "dth", "tata sky", "dish tv",
            ],
        ),
        (
            Insurance,
            &["insurance", "lic of india", "policy", "premium"],
        ),
        (
            Healthcare,
            &[
                "medical", "doctor", "hospital", "clinic", "pharmacy", "medicine", "apollo",
                "medplus", "diagnostic",
            ],
        ),
        (
            Entertainment,
            &[
                "netflix", "prime video", "hotstar", "disney", "spotify", "movie", "cinema",
                "pvr", "inox", "bookmyshow", "gaming",
            ],
        ),
        (
            Education,
            &[
                "school", "college", "university", "course", "tuition", "training", "udemy",
                "coursera", "upgrad", "byju", "unacademy",
            ],
        ),
        (
            Income,
            &[
                "salary", "deposit", "payment received", "interest", "dividend", "refund",
                "cashback", "reimbursement",
            ],
        ),
    ];

    let mut table = RuleTable::empty();
    for (category, keywords) in groups {
        for keyword in keywords {
            table.push(keyword, category.clone());
        }
    }
    table
});

/// UPI narrations often embed the payee as `name@bank-...`.
static UPI_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([^-]+)").expect("valid UPI handle regex"));

static CREDIT_TERMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:credited|cr|credit)\b").expect("valid regex"));
static CREDIT_EXCLUSIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:card|loan|emi)\b").expect("valid regex"));
static DEBIT_TERMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:debited|dr|debit)\b").expect("valid regex"));

/// Qualifiers consulted, in order, once a narration is known to be a debit.
static DEBIT_QUALIFIERS: LazyLock<Vec<(Regex, Category)>> = LazyLock::new(|| {
    [
        (r"bill payment|bill pay", Category::BillsAndUtilities),
        (r"recharge|prepaid", Category::BillsAndUtilities),
        (r"\b(?:emi|loan)\b", Category::LoanPayment),
        (r"investment|trading|share|stock", Category::Investments),
    ]
    .into_iter()
    .map(|(pattern, category)| (Regex::new(pattern).expect("valid regex"), category))
    .collect()
});

impl RuleTable {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in keyword table shared by every parse.
    pub fn builtin() -> &'static RuleTable {
        &BUILTIN_RULES
    }

    fn push(&mut self, keyword: &str, category: Category) {
        self.rules.push(Rule {
            keyword: keyword.trim().to_lowercase(),
            category,
        });
    }

    /// Build a table from explicit `(keyword, category)` pairs, keeping their order.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Category)>,
    {
        let mut table = Self::empty();
        for (keyword, category) in pairs {
            if !keyword.trim().is_empty() {
                table.push(keyword, category);
            }
        }
        table
    }

    /// Copy of this table with user-defined categories appended at lowest
    /// priority. Each label acts as its own keyword; labels that already name
    /// a rule category are ignored.
    pub fn with_custom_categories<I, S>(&self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = self.clone();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            let category = Category::from_label(label);
            if table.rules.iter().any(|r| r.category == category) {
                continue;
            }
            table.push(label, category);
        }
        table
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn first_match(&self, text: &str) -> Option<&Category> {
        self.rules
            .iter()
            .find(|r| text.contains(r.keyword.as_str()))
            .map(|r| &r.category)
    }

    /// Keyword-only lookup: UPI payee handle first, then the full narration.
    pub fn suggest(&self, description: &str) -> Option<Category> {
        let desc = description.to_lowercase();

        if desc.contains("upi") {
            if let Some(handle) = UPI_HANDLE.captures(&desc).and_then(|c| c.get(1)) {
                if let Some(cat) = self.first_match(handle.as_str()) {
                    return Some(cat.clone());
                }
            }
        }

        self.first_match(&desc).cloned()
    }

    /// Categorize a narration. Always returns a category; `Other` when nothing matches.
    pub fn categorize(&self, description: &str) -> Category {
        if let Some(cat) = self.suggest(description) {
            return cat;
        }
        heuristic_category(&description.to_lowercase()).unwrap_or(Category::Other)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        BUILTIN_RULES.clone()
    }
}

/// Generic credit/debit wording found in Indian bank narrations.
fn heuristic_category(desc: &str) -> Option<Category> {
    if CREDIT_TERMS.is_match(desc) && !CREDIT_EXCLUSIONS.is_match(desc) {
        return Some(Category::Income);
    }

    if DEBIT_TERMS.is_match(desc) {
        return DEBIT_QUALIFIERS
            .iter()
            .find(|(re, _)| re.is_match(desc))
            .map(|(_, cat)| cat.clone());
    }

    None
}

/// Categorize with the built-in rule table.
pub fn categorize(description: &str) -> Category {
    RuleTable::builtin().categorize(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiggy_is_food_regardless_of_case() {
        assert_eq!(categorize("UPI-SWIGGY-SWIG123-OTHR"), Category::FoodAndDining);
        assert_eq!(categorize("upi-swiggy-swig123-othr"), Category::FoodAndDining);
        assert_eq!(categorize("POS 4021 Swiggy Instamart BLR"), Category::FoodAndDining);
    }

    #[test]
    fn test_first_keyword_wins() {
        // "rent" (Housing) is listed before "amazon" (Shopping)
        assert_eq!(categorize("AMAZON RENT PAYMENT"), Category::Housing);
    }

    #[test]
    fn test_upi_handle_checked_before_narration() {
        // Narration alone would hit "rent"; the payee handle names the merchant.
        let desc = "UPI-RENTOMOJO-rentomojo@zomato-HDFC0001-REF";
        assert_eq!(categorize(desc), Category::FoodAndDining);
    }

    #[test]
    fn test_upi_without_handle_falls_back_to_narration() {
        assert_eq!(categorize("UPI-UBER INDIA-UBERRIDE-REF"), Category::Transportation);
    }

    #[test]
    fn test_credit_heuristic() {
        assert_eq!(categorize("NEFT CR ACME CORP"), Category::Income);
        assert_eq!(categorize("Amount credited by XYZ"), Category::Income);
        // Card credits are not income
        assert_eq!(categorize("CREDIT CARD AUTOPAY"), Category::Other);
    }

    #[test]
    fn test_debit_heuristics() {
        assert_eq!(categorize("DR BILL PAY BESCOM"), Category::BillsAndUtilities);
        assert_eq!(categorize("Debited towards prepaid topup"), Category::BillsAndUtilities);
        assert_eq!(categorize("ACH DR HOME LOAN 44321"), Category::LoanPayment);
        assert_eq!(categorize("DEBIT SHARE PURCHASE"), Category::Investments);
        assert_eq!(categorize("DR TRANSFER SELF"), Category::Other);
    }

    #[test]
    fn test_fallback_is_other() {
        assert_eq!(categorize("XYZ-123-ABC"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_suggest_returns_none_without_keyword() {
        assert_eq!(RuleTable::builtin().suggest("NEFT CR ACME CORP"), None);
        assert_eq!(
            RuleTable::builtin().suggest("Netflix subscription"),
            Some(Category::Entertainment)
        );
    }

    #[test]
    fn test_custom_categories_have_lowest_priority() {
        let table = RuleTable::builtin().with_custom_categories(["Pets", "Travel", "Shopping"]);
        assert_eq!(table.len(), RuleTable::builtin().len() + 2);
        assert_eq!(
            table.categorize("Heads Up For Tails PETS store"),
            Category::Custom("Pets".to_string())
        );
        // A builtin keyword still wins over the custom label
        assert_eq!(table.categorize("Travel via Uber"), Category::Transportation);
    }

    #[test]
    fn test_from_pairs_preserves_order() {
        let table = RuleTable::from_pairs([
            ("cafe", Category::FoodAndDining),
            ("cafe coffee day", Category::Entertainment),
            ("  ", Category::Other),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.categorize("CAFE COFFEE DAY"), Category::FoodAndDining);
    }
}
