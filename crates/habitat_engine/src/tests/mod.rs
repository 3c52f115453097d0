//! Cross-component tests driving a full editor session

mod editor_session;
