use serde_json::json;
use tw_core::{
    BoardNode, CardNode, ChecklistItem, ChecklistNode, LabelNode, ListNode, Snapshot,
};

fn full_tree() -> Snapshot {
    Snapshot {
        boards: vec![BoardNode {
            id: "b1".into(),
            name: "House".into(),
            closed: false,
            lists: vec![ListNode {
                id: "l1".into(),
                name: "Todo".into(),
                closed: true,
                cards: vec![CardNode {
                    id: "c1".into(),
                    name: "Fix door".into(),
                    description: "hinge squeaks".into(),
                    closed: false,
                    created_at: "Mon Jan  1 00:00:00 2024".into(),
                    last_activity_at: "Tue Jan  2 00:00:00 2024".into(),
                    member_ids: vec!["m1".into(), "m2".into()],
                    attachments: json!([{"url": "https://example.com/a.png"}]),
                    badges: json!({"votes": 2}),
                    labels: vec![LabelNode {
                        id: "lb1".into(),
                        name: "urgent".into(),
                        color: "red".into(),
                    }],
                    checklists: vec![ChecklistNode {
                        id: "ck1".into(),
                        name: "steps".into(),
                        items: vec![
                            ChecklistItem { name: "buy oil".into(), checked: true },
                            ChecklistItem { name: "apply".into(), checked: false },
                        ],
                    }],
                    comments: vec![json!({"data": {"text": "on it"}})],
                }],
            }],
        }],
    }
}

#[test]
fn full_depth_snapshot_round_trips_through_json() {
    let snap = full_tree();
    let text = serde_json::to_string(&snap).unwrap();
    let back: Snapshot = serde_json::from_str(&text).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn persisted_document_is_the_original_wire_shape() {
    let v = serde_json::to_value(full_tree()).unwrap();
    let card = &v[0]["lists"][0]["cards"][0];
    assert_eq!(card["creation_date"], "Mon Jan  1 00:00:00 2024");
    assert_eq!(card["last_activity"], "Tue Jan  2 00:00:00 2024");
    assert_eq!(card["idmembers"], json!(["m1", "m2"]));
    assert_eq!(card["checklists"][0]["items"][1]["checked"], json!(false));
    assert_eq!(card["badges"]["votes"], 2);
}

#[test]
fn shallow_document_parses_with_empty_children() {
    let doc = json!([{"id": "b1", "name": "House", "closed": false, "lists": []}]);
    let snap: Snapshot = serde_json::from_value(doc).unwrap();
    assert!(snap.boards[0].lists.is_empty());
}
