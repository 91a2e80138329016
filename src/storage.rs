use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_dir: PathBuf,
    pub providers: PathBuf,
    pub memberships: PathBuf,
    pub service_locations: PathBuf,
    pub claims: PathBuf,
    pub county_areas: PathBuf,
    pub specialty_standards: PathBuf,
}

impl StoragePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir: PathBuf = data_dir.into();
        let providers = data_dir.join("providers.json");
        let memberships = data_dir.join("provider_networks.json");
        let service_locations = data_dir.join("provider_service_locations.json");
        let claims = data_dir.join("claims.json");
        let county_areas = data_dir.join("county_areas.json");
        let specialty_standards = data_dir.join("specialty_density_standards.json");

        Self {
            data_dir,
            providers,
            memberships,
            service_locations,
            claims,
            county_areas,
            specialty_standards,
        }
    }

    pub fn all_files(&self) -> [&Path; 6] {
        [
            &self.providers,
            &self.memberships,
            &self.service_locations,
            &self.claims,
            &self.county_areas,
            &self.specialty_standards,
        ]
    }
}

pub fn file_present_nonempty(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(m) => m.is_file() && m.len() > 0,
        Err(_) => false,
    }
}
