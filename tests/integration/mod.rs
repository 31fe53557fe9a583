//! Integration tests driving the librarian binary

mod helpers;
mod test_release;
mod test_version;
