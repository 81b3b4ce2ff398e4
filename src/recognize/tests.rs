use super::*;

// ── recognize ─────────────────────────────────────────────────

#[test]
fn test_recognize_groceries() {
    assert_eq!(recognize("Weekly groceries run"), "Groceries");
    assert_eq!(recognize("BigBasket order"), "Groceries");
    assert_eq!(recognize("D-Mart haul"), "Groceries");
}

#[test]
fn test_recognize_utilities() {
    assert_eq!(recognize("Electricity bill"), "Utilities");
    assert_eq!(recognize("Water charges"), "Utilities");
}

#[test]
fn test_recognize_fallback() {
    assert_eq!(recognize("asdkfj"), "Other");
    assert_eq!(recognize(""), "Other");
}

#[test]
fn test_recognize_case_insensitive() {
    assert_eq!(recognize("PETROL"), "Fuel");
    assert_eq!(recognize("petrol"), "Fuel");
    assert_eq!(recognize("PeTrOl"), "Fuel");
}

#[test]
fn test_recognize_priority_order() {
    // "gas" sits in the Utilities rule, which outranks Fuel.
    assert_eq!(recognize("gas bill"), "Utilities");
    // Education (rule 4) outranks Transport (rule 5).
    assert_eq!(recognize("school bus pass"), "Education");
    // Rent (rule 2) outranks Utilities (rule 3).
    assert_eq!(recognize("rent and electricity"), "Rent");
}

#[test]
fn test_recognize_substring_semantics() {
    // Keywords match anywhere in the title, even inside longer words.
    assert_eq!(recognize("Gift for parents"), "Rent"); // "rent" in "parents"
    assert_eq!(recognize("Smart watch strap"), "Groceries"); // "mart"
    // "premium" contains "emi", and EMI/Loans outranks Insurance.
    assert_eq!(recognize("term insurance premium"), "EMI/Loans");
}

#[test]
fn test_recognize_each_rule() {
    assert_eq!(recognize("monthly rent"), "Rent");
    assert_eq!(recognize("udemy course"), "Education");
    assert_eq!(recognize("uber to airport"), "Transport");
    assert_eq!(recognize("diesel top-up"), "Fuel");
    assert_eq!(recognize("pharmacy run"), "Medical");
    assert_eq!(recognize("home loan emi"), "EMI/Loans");
    assert_eq!(recognize("wifi recharge"), "Mobile/Internet");
    assert_eq!(recognize("zomato dinner"), "Dining Out");
    assert_eq!(recognize("detergent refill"), "Household");
    assert_eq!(recognize("car insurance renewal"), "Insurance");
    assert_eq!(recognize("sip installment"), "Savings");
}

// ── categories ────────────────────────────────────────────────

#[test]
fn test_categories_order_and_fallback() {
    let cats = categories();
    assert_eq!(cats.first().copied(), Some("Groceries"));
    assert_eq!(cats.last().copied(), Some("Other"));
    assert_eq!(cats.len(), 14);
}

#[test]
fn test_recognize_always_yields_known_category() {
    let cats = categories();
    for title in ["groceries", "rent", "xyzzy", "Coffee at cafe", ""] {
        assert!(cats.contains(&recognize(title)));
    }
}
