use sha2::{Digest, Sha256};
use url::Url;

const MAX_STEM_LEN: usize = 64;

/// Derive a filesystem-safe, deterministic file stem from a story link.
/// The readable part comes from the link's host and path; uniqueness comes
/// from a short sha256 suffix of the full link, so distinct links never
/// collide and re-runs always produce the same name.
pub fn slug_for(link: &Url) -> String {
    let mut stem = String::new();
    if let Some(host) = link.host_str() {
        push_sanitized(&mut stem, host);
    }
    push_sanitized(&mut stem, link.path());

    let stem = stem.trim_matches('-');
    let stem = if stem.is_empty() { "story" } else { stem };
    let stem: String = stem.chars().take(MAX_STEM_LEN).collect();

    let digest = Sha256::digest(link.as_str().as_bytes());
    let suffix: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();

    format!("{}-{}", stem.trim_end_matches('-'), suffix)
}

fn push_sanitized(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
}
