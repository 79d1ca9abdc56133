use crate::save::record::SaveState;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// "IDLEARPG" in hex.
pub const SAVE_MAGIC: u64 = 0x4944_4C45_4152_5047;

/// Saves and loads the JSON save record inside a checksummed envelope.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Creates a SaveManager writing to the platform config directory.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "idle-arpg").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("save.dat"),
        })
    }

    /// Creates a SaveManager for an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    /// Writes the record to disk.
    ///
    /// File format:
    /// - Magic (8 bytes)
    /// - Payload length (4 bytes, little endian)
    /// - JSON payload
    /// - SHA-256 over the three fields above (32 bytes)
    pub fn save(&self, record: &SaveState) -> io::Result<()> {
        let json = record
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data = json.as_bytes();
        let data_len = u32::try_from(data.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "save record too large"))?;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(data);
        let checksum = hasher.finalize();

        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // temp file + rename
        let tmp_path = self.save_path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&SAVE_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(data)?;
        file.write_all(&checksum)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &self.save_path)?;

        Ok(())
    }

    /// Reads and verifies the envelope, returning the JSON payload.
    ///
    /// Returns `NotFound` when there is no save, `InvalidData` when the magic
    /// or checksum does not match.
    pub fn load_json(&self) -> io::Result<String> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid save magic: expected 0x{SAVE_MAGIC:016X}, got 0x{magic:016X}"),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        String::from_utf8(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads and parses the record.
    pub fn load(&self) -> io::Result<SaveState> {
        let json = self.load_json()?;
        SaveState::from_json(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::GameState;

    fn temp_manager(name: &str) -> SaveManager {
        let path = std::env::temp_dir().join(format!(
            "idle-arpg-test-{}-{}.dat",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        SaveManager::with_path(path)
    }

    #[test]
    fn test_save_and_load() {
        let manager = temp_manager("roundtrip");

        let mut state = GameState::default();
        state.character.level = 12;
        state.character.gold = 4321;
        state.boss_state.bosses_defeated = 2;
        let record = SaveState::capture(&state, 1_700_000_000_000);

        manager.save(&record).expect("Failed to save");
        assert!(manager.save_exists());

        let loaded = manager.load().expect("Failed to load");
        assert_eq!(loaded, record);

        fs::remove_file(manager.path()).expect("Failed to remove save file");
    }

    #[test]
    fn test_load_nonexistent() {
        let manager = temp_manager("missing");
        let result = manager.load();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_tampered_payload_fails_checksum() {
        let manager = temp_manager("tampered");
        manager.save(&SaveState::default()).expect("Failed to save");

        let mut bytes = fs::read(manager.path()).unwrap();
        // Flip a byte inside the JSON payload.
        bytes[20] ^= 0x01;
        fs::write(manager.path(), &bytes).unwrap();

        let err = manager.load_json().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        fs::remove_file(manager.path()).unwrap();
    }

    #[test]
    fn test_wrong_magic_rejected() {
        let manager = temp_manager("magic");
        fs::write(manager.path(), [0u8; 64]).unwrap();
        let err = manager.load_json().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        fs::remove_file(manager.path()).unwrap();
    }
}
