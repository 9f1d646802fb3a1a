mod filesystem;
mod http;

pub(crate) use filesystem::{ensure_dir, is_regular_file, write_atomic_file};
pub(crate) use http::{build_http_client, header_map};
