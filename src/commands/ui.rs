use teloxide::types::{InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup};

pub const ADD_DEAL_CALLBACK: &str = "add_deal";
pub const ADD_PAIR_CALLBACK: &str = "add_pair";
pub const HISTORY_CALLBACK: &str = "get_history";
pub const CANCEL_CALLBACK: &str = "cancel";
pub const PAIR_CALLBACK_PREFIX: &str = "pair_";

pub fn create_main_menu_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            InlineKeyboardButton::callback("Add deal", ADD_DEAL_CALLBACK),
            InlineKeyboardButton::callback("Add pair", ADD_PAIR_CALLBACK),
        ],
        vec![InlineKeyboardButton::callback(
            "Deal history",
            HISTORY_CALLBACK,
        )],
    ])
}

// Buttons carry the position of the pair, the label carries its name.
// Telegram caps callback data at 64 bytes, which a multi-byte name can exceed.
pub fn create_pair_choice_keyboard(pairs: &[String]) -> InlineKeyboardMarkup {
    let mut keyboard_buttons: Vec<Vec<InlineKeyboardButton>> = pairs
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            vec![InlineKeyboardButton::callback(
                pair.clone(),
                pair_callback_data(index),
            )]
        })
        .collect();

    keyboard_buttons.push(vec![InlineKeyboardButton::callback(
        "← Cancel",
        CANCEL_CALLBACK,
    )]);

    InlineKeyboardMarkup::new(keyboard_buttons)
}

pub fn pair_callback_data(index: usize) -> String {
    format!("{}{}", PAIR_CALLBACK_PREFIX, index)
}

pub fn is_pair_callback(data: &str) -> bool {
    data.strip_prefix(PAIR_CALLBACK_PREFIX)
        .is_some_and(|index| index.parse::<usize>().is_ok())
}

/// Find the pair name behind a pressed pair button by looking it up in the
/// keyboard the button belongs to
pub fn resolve_pair_choice(keyboard: &InlineKeyboardMarkup, data: &str) -> Option<String> {
    keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .find(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(callback) => callback == data,
            _ => false,
        })
        .map(|button| button.text.clone())
}
