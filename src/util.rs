use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const LABEL_CHARS: usize = 12;

/// Canvas label: names longer than twelve characters are cut and suffixed.
pub fn short_label(name: &str) -> String {
    if name.chars().count() > LABEL_CHARS {
        let head = name.chars().take(LABEL_CHARS).collect::<String>();
        format!("{head}...")
    } else {
        name.to_owned()
    }
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}
