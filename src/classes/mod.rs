mod body;
mod collection;

use axum::Router;

use crate::{
    db::{self, Message, Room, User},
    query::{Getter, Poster},
    AppState,
};

pub use body::{read_limited, BodyLimit};
pub use collection::{collection, Results};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(collection(
            "messages",
            Getter::<Message>::new(db::SELECT_MESSAGES),
            Poster::new(db::INSERT_MESSAGE),
        ))
        .merge(collection(
            "rooms",
            Getter::<Room>::new(db::SELECT_ROOMS),
            Poster::new(db::INSERT_ROOM),
        ))
        .merge(collection(
            "users",
            Getter::<User>::new(db::SELECT_USERS),
            Poster::new(db::INSERT_USER),
        ))
}
