use serde_json::Value;
use tw_source::BoardSource;
use tw_store::SnapshotStore;

use crate::args::Args;
use crate::{actions, triggers, HookError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookKind {
    /// Runs once before any trigger or action, at host startup.
    Prelaunch,
    /// Checked on the host's schedule; reports fire/no-fire.
    Trigger,
    /// One-shot mutation or lookup.
    Action,
}

impl HookKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::Prelaunch => "prelaunch",
            HookKind::Trigger => "trigger",
            HookKind::Action => "action",
        }
    }
}

/// Declared argument: name plus the host's type notation
/// (e.g. `str|[str]|none`).
pub struct ArgSpec {
    pub name: &'static str,
    pub ty: &'static str,
}

/// Declarative capability descriptor, replacing the original's
/// metadata-on-callable registration with an explicit table entry.
pub struct Descriptor {
    pub key: &'static str,
    pub kind: HookKind,
    pub name: &'static str,
    pub description: &'static str,
    pub required_args: &'static [ArgSpec],
    pub generated_args: &'static [ArgSpec],
}

/// Collaborators a hook runs against. The source owns credentials and
/// transport; the store owns the persisted baseline.
pub struct HookContext<'a> {
    pub source: &'a dyn BoardSource,
    pub store: &'a dyn SnapshotStore,
}

pub type Handler = fn(&HookContext, &Args) -> Result<Value, HookError>;

pub struct Hook {
    pub descriptor: Descriptor,
    pub run: Handler,
}

pub fn registry() -> &'static [Hook] {
    REGISTRY
}

pub fn find(key: &str) -> Option<&'static Hook> {
    REGISTRY.iter().find(|h| h.descriptor.key == key)
}

const BOARD: ArgSpec = ArgSpec { name: "board_name", ty: "str" };
const LIST: ArgSpec = ArgSpec { name: "listname", ty: "str" };
const CARD: ArgSpec = ArgSpec { name: "cardname", ty: "str" };

static REGISTRY: &[Hook] = &[
    Hook {
        descriptor: Descriptor {
            key: "record-starting-state",
            kind: HookKind::Prelaunch,
            name: "Trello: Record starting state",
            description: "Seeds the snapshot baseline from the live board tree",
            required_args: &[],
            generated_args: &[],
        },
        run: triggers::record_starting_state,
    },
    Hook {
        descriptor: Descriptor {
            key: "board-created",
            kind: HookKind::Trigger,
            name: "Trello: Any board created",
            description: "Fires when a new board is created",
            required_args: &[],
            generated_args: &[ArgSpec { name: "board", ty: "str|[str]|none" }],
        },
        run: triggers::board_created,
    },
    Hook {
        descriptor: Descriptor {
            key: "specific-board-created",
            kind: HookKind::Trigger,
            name: "Trello: Specific board(s) created",
            description: "Fires when a specific board (or multiple boards) is/are created",
            required_args: &[ArgSpec { name: "board_name", ty: "str|[str]" }],
            generated_args: &[ArgSpec { name: "board", ty: "str|[str]|none" }],
        },
        run: triggers::specific_board_created,
    },
    Hook {
        descriptor: Descriptor {
            key: "create-board",
            kind: HookKind::Action,
            name: "Trello: Create board(s)",
            description: "Create one or more boards",
            required_args: &[
                ArgSpec { name: "board_names", ty: "str|[str]" },
                ArgSpec { name: "permissions", ty: "str|[str]|none" },
            ],
            generated_args: &[],
        },
        run: actions::create_board,
    },
    Hook {
        descriptor: Descriptor {
            key: "board-exists",
            kind: HookKind::Action,
            name: "Trello: Does board exist?",
            description: "Return whether or not a board exists",
            required_args: &[BOARD],
            generated_args: &[ArgSpec { name: "exists", ty: "bool" }],
        },
        run: actions::board_exists,
    },
    Hook {
        descriptor: Descriptor {
            key: "list-exists",
            kind: HookKind::Action,
            name: "Trello: Does list exist?",
            description: "Return whether or not a particular list exists",
            required_args: &[BOARD, LIST],
            generated_args: &[ArgSpec { name: "exists", ty: "bool" }],
        },
        run: actions::list_exists,
    },
    Hook {
        descriptor: Descriptor {
            key: "card-exists",
            kind: HookKind::Action,
            name: "Trello: Does card exist?",
            description: "Return whether or not a particular card exists",
            required_args: &[BOARD, LIST, CARD],
            generated_args: &[ArgSpec { name: "exists", ty: "bool" }],
        },
        run: actions::card_exists,
    },
    Hook {
        descriptor: Descriptor {
            key: "board-link",
            kind: HookKind::Action,
            name: "Trello: Get link to board",
            description: "Get a url for a given board",
            required_args: &[BOARD],
            generated_args: &[ArgSpec { name: "link", ty: "str" }],
        },
        run: actions::board_link,
    },
    Hook {
        descriptor: Descriptor {
            key: "card-link",
            kind: HookKind::Action,
            name: "Trello: Get link to card",
            description: "Get a url for a card given its board and list",
            required_args: &[BOARD, LIST, CARD],
            generated_args: &[ArgSpec { name: "link", ty: "str" }],
        },
        run: actions::card_link,
    },
    Hook {
        descriptor: Descriptor {
            key: "comment-card",
            kind: HookKind::Action,
            name: "Trello: Create comment on card",
            description: "Given the path to a card, make a comment there",
            required_args: &[BOARD, LIST, CARD, ArgSpec { name: "comment_string", ty: "str" }],
            generated_args: &[],
        },
        run: actions::comment_card,
    },
    Hook {
        descriptor: Descriptor {
            key: "label-card",
            kind: HookKind::Action,
            name: "Trello: Add label to card",
            description: "Given the path to a card, add a label to it",
            required_args: &[BOARD, LIST, CARD, ArgSpec { name: "label_string", ty: "str" }],
            generated_args: &[],
        },
        run: actions::label_card,
    },
    Hook {
        descriptor: Descriptor {
            key: "card-labels",
            kind: HookKind::Action,
            name: "Trello: Get labels on card",
            description: "Given the path to a card, get the labels on it",
            required_args: &[BOARD, LIST, CARD],
            generated_args: &[ArgSpec { name: "labels", ty: "str|[str]|none" }],
        },
        run: actions::card_labels,
    },
    Hook {
        descriptor: Descriptor {
            key: "create-label",
            kind: HookKind::Action,
            name: "Trello: Create label",
            description: "Creates a new label for a given board",
            required_args: &[
                BOARD,
                ArgSpec { name: "color", ty: "str" },
                ArgSpec { name: "name", ty: "str" },
            ],
            generated_args: &[],
        },
        run: actions::create_label,
    },
    Hook {
        descriptor: Descriptor {
            key: "add-checklist",
            kind: HookKind::Action,
            name: "Trello: Add checklist to card",
            description: "Add a new checklist to a card",
            required_args: &[BOARD, LIST, CARD, ArgSpec { name: "checklist", ty: "str" }],
            generated_args: &[],
        },
        run: actions::add_checklist,
    },
    Hook {
        descriptor: Descriptor {
            key: "add-checklist-item",
            kind: HookKind::Action,
            name: "Trello: Add item on card checklist",
            description: "Add an item to a given checklist",
            required_args: &[
                BOARD,
                LIST,
                CARD,
                ArgSpec { name: "checklist", ty: "str" },
                ArgSpec { name: "item", ty: "str" },
                ArgSpec { name: "checked", ty: "bool|none" },
            ],
            generated_args: &[],
        },
        run: actions::add_checklist_item,
    },
    Hook {
        descriptor: Descriptor {
            key: "set-checklist-item",
            kind: HookKind::Action,
            name: "Trello: Set item on card checklist",
            description: "Mark a given item on a checklist on or off",
            required_args: &[
                BOARD,
                LIST,
                CARD,
                ArgSpec { name: "checklist", ty: "str" },
                ArgSpec { name: "item", ty: "str" },
                ArgSpec { name: "onoff", ty: "bool|none" },
            ],
            generated_args: &[],
        },
        run: actions::set_checklist_item,
    },
    Hook {
        descriptor: Descriptor {
            key: "remove-checklist-item",
            kind: HookKind::Action,
            name: "Trello: Remove item on card checklist",
            description: "Remove a given item from a checklist",
            required_args: &[
                BOARD,
                LIST,
                CARD,
                ArgSpec { name: "checklist", ty: "str" },
                ArgSpec { name: "item", ty: "str" },
            ],
            generated_args: &[],
        },
        run: actions::remove_checklist_item,
    },
];
