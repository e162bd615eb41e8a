// Chromini services
// Stateless helpers the managers build on: the config document, URL input,
// surface creation and the context menu.

pub mod config_store;
pub mod context_menu;
pub mod surface_factory;
pub mod url_input;
