use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use solana_sdk::signature::{self, Keypair};

/// Expands a leading `~` to `$HOME`.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Reads a keypair stored as a JSON array of 64 bytes, the format written by
/// `solana-keygen`.
pub fn read_keypair(path: &Path) -> Result<Keypair> {
    let path = expand_home(path);
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("reading keypair {}", path.display()))?;
    signature::read_keypair(&mut contents.as_bytes())
        .map_err(|e| anyhow!("keypair {} is not a valid JSON byte array: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use solana_sdk::signer::Signer;

    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "configure-vault-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_solana_keygen_format() {
        let keypair = Keypair::new();
        let json = serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap();
        let path = scratch_file("ok", &json);

        let loaded = read_keypair(&path).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn rejects_malformed_files() {
        let path = scratch_file("short", "[1, 2, 3]");
        assert!(read_keypair(&path).is_err());
        std::fs::remove_file(&path).unwrap();

        let path = scratch_file("text", "not json");
        let err = read_keypair(&path).unwrap_err();
        assert!(err.to_string().contains("not a valid JSON byte array"));
        std::fs::remove_file(path).unwrap();

        assert!(read_keypair(Path::new("/nonexistent/id.json")).is_err());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        let expanded = expand_home(Path::new("~/.config/solana/id.json"));
        match home {
            Some(home) => assert_eq!(expanded, home.join(".config/solana/id.json")),
            None => assert_eq!(expanded, PathBuf::from("~/.config/solana/id.json")),
        }
        assert_eq!(expand_home(Path::new("/abs/id.json")), PathBuf::from("/abs/id.json"));
    }
}
