mod output;

mod container;
pub use container::{encode_tagged, load_tagged, save_tagged};

mod raw;
pub use raw::{load_raw, load_untagged, save_raw, to_raw_bytes, write_raw};

mod sidecar;
pub use sidecar::{read_geometry_sidecar, sidecar_path, write_geometry_sidecar};

mod text;
pub use text::{
    read_text, save_text, tagged_pixel_header, to_text, write_text, TextLayout, TextOptions,
};
