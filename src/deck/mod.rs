pub mod edit;
pub mod storage;

pub use edit::{
    add_card, create_new_deck, delete_card, edit_card_text, new_card_id, update_card, EditError,
};
pub use storage::{load_deck, save_deck, validate_deck_path, DeckError};
