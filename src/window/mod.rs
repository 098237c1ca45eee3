//! Window facades.
//!
//! Thin composition layer between a typed, user-friendly request
//! description and the generic schema the broker sends. Also hosts the
//! one-shot `send_*` convenience surface for callers that don't need a
//! reusable facade value.

pub mod dialog;
pub mod form;
pub mod menu;

use std::collections::HashMap;
use std::hash::Hash;

use crate::broker::RequestBroker;
use crate::errors::FormError;
use crate::schema::element::Field;
use crate::schema::request::{FieldValue, MenuButton, SessionId};

pub use self::dialog::Dialog;
pub use self::form::Form;
pub use self::menu::Menu;

/// Ask a one-off yes/no question.
pub async fn send_dialog(
    broker: &RequestBroker,
    session: SessionId,
    title: &str,
    content: &str,
    button1: &str,
    button2: &str,
) -> Result<bool, FormError> {
    Dialog::new(title, content, button1, button2)
        .request(broker, session)
        .await
}

/// Show a one-off form; the result maps each declared key to its
/// validated value.
pub async fn send_form<K: Eq + Hash + Clone>(
    broker: &RequestBroker,
    session: SessionId,
    title: &str,
    fields: Vec<(K, Field)>,
) -> Result<HashMap<K, FieldValue>, FormError> {
    let mut form = Form::new(title);
    for (key, field) in fields {
        form.field(key, field);
    }
    form.request(broker, session).await
}

/// Show a one-off button menu; the result is the pressed button's payload.
pub async fn send_menu<T: Clone>(
    broker: &RequestBroker,
    session: SessionId,
    title: &str,
    content: &str,
    buttons: Vec<(MenuButton, T)>,
) -> Result<T, FormError> {
    let mut menu = Menu::new(title, content);
    for (button, value) in buttons {
        menu.add(button, value);
    }
    menu.request(broker, session).await
}
