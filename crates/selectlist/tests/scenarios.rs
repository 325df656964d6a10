use selectlist::Selection;
use selectlist::infra::codec::{InputFormat, decode_str, decode_with};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tab {
    Inbox,
    Drafts,
    Archive,
}

#[test]
fn filter_keeps_or_drops_selection() {
    let selection = Selection::from_list(vec![1, 2, 3]).select(&2);

    let above_one = selection.clone().filter(|x| *x > 1);
    assert_eq!(above_one.to_list(), vec![2, 3]);
    assert_eq!(above_one.selected(), Some(&2));

    let below_two = selection.filter(|x| *x < 2);
    assert_eq!(below_two.to_list(), vec![1]);
    assert_eq!(below_two.selected(), None);
}

#[test]
fn latest_successful_select_wins() {
    let selection = Selection::from_list(vec![Tab::Inbox, Tab::Drafts, Tab::Archive])
        .select(&Tab::Inbox)
        .select(&Tab::Drafts);
    assert_eq!(selection.selected(), Some(&Tab::Drafts));

    let without_archive = selection.filter(|tab| *tab != Tab::Archive);
    let selection = without_archive.select(&Tab::Archive);
    assert_eq!(selection.selected(), Some(&Tab::Drafts));
}

#[test]
fn map_selected_hits_every_duplicate() {
    let selection = Selection::from_list(vec![1, 2, 2, 3])
        .select(&2)
        .map_selected(|x| x * 10, |x| x);
    assert_eq!(selection.to_list(), vec![1, 20, 20, 3]);
    assert_eq!(selection.selected(), Some(&20));
}

#[test]
fn map_selected_can_label_items() {
    let labels: Vec<String> = Selection::from_list(vec![Tab::Inbox, Tab::Drafts])
        .select(&Tab::Drafts)
        .map_selected(|tab| format!("*{tab:?}*"), |tab| format!("{tab:?}"))
        .into_list();
    assert_eq!(labels, vec!["Inbox".to_string(), "*Drafts*".to_string()]);
}

#[test]
fn decoded_selection_is_restored_with_select() {
    let persisted_selected = "beta".to_string();
    let selection = decode_str::<String>(r#"["alpha", "beta", "gamma"]"#, InputFormat::Json)
        .expect("decode list");
    assert_eq!(selection.selected(), None);

    let restored = selection.select(&persisted_selected);
    assert_eq!(restored.selected(), Some(&persisted_selected));
}

#[test]
fn decode_with_custom_item_decoder() {
    let selection = decode_with(["inbox", "archive"], |name| match name {
        "inbox" => Ok(Tab::Inbox),
        "drafts" => Ok(Tab::Drafts),
        "archive" => Ok(Tab::Archive),
        other => Err(format!("unknown tab '{other}'")),
    })
    .expect("decode tabs");
    assert_eq!(selection.items(), &[Tab::Inbox, Tab::Archive]);

    let err = decode_with(["inbox", "spam"], |name| match name {
        "inbox" => Ok(Tab::Inbox),
        other => Err(format!("unknown tab '{other}'")),
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "invalid item at index 1: unknown tab 'spam'");
}

#[test]
fn empty_selection_handles_every_operation() {
    let selection = Selection::<i32>::from_list(Vec::new())
        .select(&1)
        .select_by(|_| true)
        .deselect()
        .filter(|_| true)
        .map_selected(|x| x + 1, |x| x - 1)
        .map(|x| x * 2);
    assert!(selection.is_empty());
    assert_eq!(selection.selected(), None);
    assert!(selection.to_list_with_selected().is_empty());
}
