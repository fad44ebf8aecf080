use std::path::Path;

use log::{info, warn};

use crate::csv_io::{from_csv_with, to_csv, CsvImport};
use crate::error::StatsError;
use crate::models::{Profile, Sample, SlashDateOrder};

/// Leser inn profil fra disk (JSON).
/// Mangler filen, brukes standardprofil.
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile, StatsError> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        let profile: Profile = serde_json::from_str(&contents)?;
        info!(
            "profile loaded from {} (goal={:?}, height={:?})",
            path.display(),
            profile.goal_weight,
            profile.height_cm
        );
        Ok(profile)
    } else {
        warn!("no profile at {}, using defaults", path.display());
        Ok(Profile::default())
    }
}

/// Skriver profil som pen JSON.
pub fn save_profile<P: AsRef<Path>>(profile: &Profile, path: P) -> Result<(), StatsError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(profile)?;
    std::fs::write(path, json)?;
    info!("profile saved to {}", path.display());
    Ok(())
}

pub fn import_csv_file<P: AsRef<Path>>(
    path: P,
    order: SlashDateOrder,
) -> Result<CsvImport, StatsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let import = from_csv_with(&text, order);
    info!(
        "imported {} entries from {} ({} rows skipped)",
        import.samples.len(),
        path.display(),
        import.skipped_count
    );
    Ok(import)
}

pub fn export_csv_file<P: AsRef<Path>>(path: P, samples: &[Sample]) -> Result<(), StatsError> {
    let path = path.as_ref();
    std::fs::write(path, to_csv(samples)?)?;
    info!("exported {} entries to {}", samples.len(), path.display());
    Ok(())
}
