use super::*;

fn rows(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_owned()).collect()
}

#[test]
fn replace_makes_a_sole_selection() {
    let order = rows(&["l1", "l2", "l3"]);
    let mut sel = Selection::new();
    sel.apply("l2", SelectMode::Replace, &order);
    sel.apply("l3", SelectMode::Replace, &order);
    assert_eq!(sel.ids(), ["l3".to_owned()]);
    assert_eq!(sel.len(), 1);
}

#[test]
fn toggle_appends_then_removes() {
    let order = rows(&["l1", "l2", "l3"]);
    let mut sel = Selection::new();
    sel.apply("l1", SelectMode::Toggle, &order);
    sel.apply("l3", SelectMode::Toggle, &order);
    assert_eq!(sel.ids(), ["l1".to_owned(), "l3".to_owned()]);
    sel.apply("l1", SelectMode::Toggle, &order);
    assert_eq!(sel.ids(), ["l3".to_owned()]);
    assert!(sel.contains("l3"));
    assert!(!sel.contains("l1"));
}

#[test]
fn range_extends_downward_from_the_anchor() {
    let order = rows(&["l1", "l2", "l3", "l4", "l5"]);
    let mut sel = Selection::new();
    sel.apply("l2", SelectMode::Replace, &order);
    sel.apply("l4", SelectMode::Range, &order);
    assert_eq!(sel.ids(), rows(&["l2", "l3", "l4"]));
}

#[test]
fn range_upward_keeps_selection_order_not_row_order() {
    let order = rows(&["l1", "l2", "l3", "l4", "l5"]);
    let mut sel = Selection::new();
    sel.apply("l4", SelectMode::Replace, &order);
    sel.apply("l1", SelectMode::Range, &order);
    // the anchor stays first; the covered rows append in row order
    assert_eq!(sel.ids(), rows(&["l4", "l1", "l2", "l3"]));
}

#[test]
fn range_anchors_at_the_most_recent_selection() {
    let order = rows(&["l1", "l2", "l3", "l4", "l5"]);
    let mut sel = Selection::new();
    sel.apply("l1", SelectMode::Replace, &order);
    sel.apply("l5", SelectMode::Toggle, &order);
    sel.apply("l3", SelectMode::Range, &order);
    assert_eq!(sel.ids(), rows(&["l1", "l5", "l3", "l4"]));
}

#[test]
fn range_without_an_anchor_replaces() {
    let order = rows(&["l1", "l2", "l3"]);
    let mut sel = Selection::new();
    sel.apply("l2", SelectMode::Range, &order);
    assert_eq!(sel.ids(), ["l2".to_owned()]);
}

#[test]
fn range_with_a_hidden_endpoint_replaces() {
    // anchor is selected but no longer a visible row
    let order = rows(&["l1", "l2", "l3"]);
    let mut sel = Selection::new();
    sel.apply("hidden", SelectMode::Toggle, &order);
    sel.apply("l2", SelectMode::Range, &order);
    assert_eq!(sel.ids(), ["l2".to_owned()]);
}

#[test]
fn clear_empties_the_selection() {
    let order = rows(&["l1"]);
    let mut sel = Selection::new();
    sel.apply("l1", SelectMode::Replace, &order);
    sel.clear();
    assert!(sel.is_empty());
}
