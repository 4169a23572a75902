//! Magnet command: v2 magnet URI encode/decode.

use anyhow::Result;

use mediahash_schema::MagnetDescriptor;

/// Build and print a magnet URI from an info-hash.
pub fn encode(info_hash: &str, name: Option<&str>, size: Option<u64>) -> Result<()> {
    let mut desc = MagnetDescriptor::new(info_hash)?;
    if let Some(name) = name {
        desc = desc.with_display_name(name);
    }
    if let Some(size) = size {
        desc = desc.with_size(size);
    }
    println!("{desc}");
    Ok(())
}

/// Parse a magnet URI and print its fields.
pub fn decode(uri: &str) -> Result<()> {
    let desc = MagnetDescriptor::decode(uri)?;
    println!("info-hash: {}", desc.info_hash());
    println!(
        "name:      {}",
        desc.display_name().unwrap_or("(not present)")
    );
    match desc.size_bytes() {
        Some(size) => println!("size:      {size}"),
        None => println!("size:      (not present)"),
    }
    Ok(())
}
