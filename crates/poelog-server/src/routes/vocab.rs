//! Channel and command vocabulary routes, for UI pickers and labels.

use axum::Json;
use poelog_types::{Action, Channel};
use serde::Serialize;

#[derive(Serialize)]
pub struct ChannelInfo {
    pub name: &'static str,
    pub prefix: Option<char>,
}

pub async fn channels() -> Json<Vec<ChannelInfo>> {
    Json(
        Channel::ALL
            .into_iter()
            .map(|channel| ChannelInfo {
                name: channel.as_str(),
                prefix: channel.prefix(),
            })
            .collect(),
    )
}

pub async fn commands() -> Json<Vec<&'static str>> {
    Json(Action::all().map(Action::command).collect())
}
