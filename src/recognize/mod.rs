/// Label used when no rule matches a title.
pub(crate) const FALLBACK: &str = "Other";

/// Ordered keyword rules. Evaluation walks top to bottom and the first rule
/// with any keyword appearing as a substring of the lowercased title wins,
/// so earlier rules shadow later ones ("gas bill" is Utilities, not Fuel).
const RULES: &[(&str, &[&str])] = &[
    (
        "Groceries",
        &["grocery", "groceries", "supermarket", "mart", "bigbasket", "blinkit"],
    ),
    ("Rent", &["rent", "lease"]),
    (
        "Utilities",
        &["electric", "electricity", "water", "sewage", "gas", "bill", "utility"],
    ),
    (
        "Education",
        &["school", "college", "tuition", "course", "exam", "udemy", "coursera"],
    ),
    (
        "Transport",
        &["uber", "ola", "bus", "metro", "train", "taxi", "cab", "auto", "flight", "ticket"],
    ),
    ("Fuel", &["fuel", "petrol", "diesel", "gasoline"]),
    (
        "Medical",
        &["med", "hospital", "clinic", "pharmacy", "chemist", "doctor"],
    ),
    ("EMI/Loans", &["emi", "loan", "mortgage"]),
    (
        "Mobile/Internet",
        &["mobile", "internet", "broadband", "fiber", "recharge", "wifi"],
    ),
    (
        "Dining Out",
        &["restaurant", "dining", "dine", "cafe", "coffee", "food", "swiggy", "zomato"],
    ),
    (
        "Household",
        &["household", "cleaning", "detergent", "utensil", "home needs"],
    ),
    ("Insurance", &["insurance", "premium"]),
    ("Savings", &["saving", "deposit", "rd", "fd", "sip"]),
];

/// Guess a category for a free-text expense title. Total function: any
/// input maps to some label, unmatched titles map to [`FALLBACK`].
pub(crate) fn recognize(title: &str) -> &'static str {
    let t = title.to_lowercase();
    for (label, keywords) in RULES {
        if keywords.iter().any(|k| t.contains(k)) {
            return label;
        }
    }
    FALLBACK
}

/// All category labels in rule order, fallback last. Drives the category
/// filter cycle and the add/edit form suggestions.
pub(crate) fn categories() -> Vec<&'static str> {
    RULES
        .iter()
        .map(|(label, _)| *label)
        .chain(std::iter::once(FALLBACK))
        .collect()
}

#[cfg(test)]
mod tests;
