//! Checksum of an upload batch, reported back so clients can tell whether a
//! re-upload changed anything.

use sha2::{Digest, Sha256};

/// SHA-256 over each file's name and bytes, in upload order.
///
/// Name and content lengths are hashed ahead of the data so that moving bytes
/// between a name and its content changes the digest.
pub fn batch_checksum<'a, I>(files: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut hasher = Sha256::new();
    for (name, bytes) in files {
        hasher.update((name.len() as u64).to_le_bytes());
        hasher.update(name.as_bytes());
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    hex::encode(hasher.finalize())
}
