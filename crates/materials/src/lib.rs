//! Material catalogs: optical constants, densities, and thermal limits for sail layers.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Wavelength-dependent optical constant: either a scalar, or a table of
/// `[wavelength_m, value]` rows sorted by wavelength and interpolated
/// linearly (clamped at both ends).
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum IndexModel {
    Constant(f64),
    Table(Vec<[f64; 2]>),
}

impl Default for IndexModel {
    fn default() -> Self {
        IndexModel::Constant(0.0)
    }
}

impl IndexModel {
    /// Evaluate the model at `wavelength_m`.
    pub fn at(&self, wavelength_m: f64) -> f64 {
        match self {
            IndexModel::Constant(v) => *v,
            IndexModel::Table(rows) => {
                if rows.is_empty() {
                    return 0.0;
                }
                if wavelength_m <= rows[0][0] {
                    return rows[0][1];
                }
                if let Some(last) = rows.last() {
                    if wavelength_m >= last[0] {
                        return last[1];
                    }
                }
                for pair in rows.windows(2) {
                    let [x0, y0] = pair[0];
                    let [x1, y1] = pair[1];
                    if wavelength_m <= x1 {
                        let t = (wavelength_m - x0) / (x1 - x0);
                        return y0 + t * (y1 - y0);
                    }
                }
                rows[rows.len() - 1][1]
            }
        }
    }
}

/// One material entry as stored in catalog files.
#[derive(Debug, Deserialize, Clone)]
pub struct MaterialRecord {
    pub name: String,
    pub density_kg_m3: f64,
    /// Maximum temperature the material survives (K).
    pub max_temperature_k: f64,
    /// Absorption coefficient in the laser band (cm⁻¹). Extinction data in
    /// the near IR is poorly established for most candidate materials, so
    /// laser-band absorption is carried separately from `extinction`.
    pub abs_coeff_cm: f64,
    pub refractive_index: IndexModel,
    #[serde(default)]
    pub extinction: IndexModel,
}

impl MaterialRecord {
    /// Real refractive index n at `wavelength_m`.
    pub fn refractive_index(&self, wavelength_m: f64) -> f64 {
        self.refractive_index.at(wavelength_m)
    }

    /// Extinction coefficient k at `wavelength_m`.
    pub fn extinction(&self, wavelength_m: f64) -> f64 {
        self.extinction.at(wavelength_m)
    }
}

/// Errors raised while loading or querying material catalogs.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("material '{0}' not found in catalog")]
    NotFound(String),
    #[error("failed to read material catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Ordered collection of material records with name lookup.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    records: Vec<MaterialRecord>,
}

impl MaterialCatalog {
    /// Catalog of reference materials used in the lightsail literature.
    /// Optical constants are coarse tabulations; load a file catalog to
    /// override them.
    pub fn builtin() -> Self {
        Self {
            records: vec![
                MaterialRecord {
                    name: "SiO2".to_string(),
                    density_kg_m3: 2200.0,
                    max_temperature_k: 1983.0,
                    abs_coeff_cm: 1.0e-6,
                    refractive_index: IndexModel::Table(vec![
                        [1.0e-6, 1.450],
                        [2.0e-6, 1.438],
                        [3.0e-6, 1.419],
                        [5.0e-6, 1.342],
                        [7.0e-6, 1.146],
                        [8.0e-6, 0.774],
                        [9.0e-6, 1.750],
                        [10.0e-6, 2.694],
                        [12.0e-6, 1.880],
                        [15.0e-6, 1.400],
                        [20.0e-6, 1.900],
                        [25.0e-6, 2.100],
                    ]),
                    extinction: IndexModel::Table(vec![
                        [1.0e-6, 0.0],
                        [2.0e-6, 1.0e-5],
                        [5.0e-6, 4.0e-3],
                        [7.0e-6, 8.0e-2],
                        [8.0e-6, 5.0e-1],
                        [9.3e-6, 1.8],
                        [10.0e-6, 4.0e-1],
                        [12.5e-6, 2.0e-1],
                        [15.0e-6, 8.0e-1],
                        [21.0e-6, 1.5],
                        [25.0e-6, 4.0e-1],
                    ]),
                },
                MaterialRecord {
                    name: "GeO2".to_string(),
                    density_kg_m3: 3650.0,
                    max_temperature_k: 1388.0,
                    abs_coeff_cm: 1.0e-4,
                    refractive_index: IndexModel::Table(vec![
                        [1.0e-6, 1.587],
                        [3.0e-6, 1.571],
                        [5.0e-6, 1.510],
                        [8.0e-6, 1.300],
                        [10.0e-6, 0.900],
                        [11.5e-6, 2.100],
                        [15.0e-6, 1.800],
                        [25.0e-6, 1.900],
                    ]),
                    extinction: IndexModel::Table(vec![
                        [1.0e-6, 0.0],
                        [3.0e-6, 5.0e-5],
                        [6.0e-6, 1.0e-2],
                        [9.0e-6, 3.0e-1],
                        [11.0e-6, 1.2],
                        [13.0e-6, 5.0e-1],
                        [18.0e-6, 9.0e-1],
                        [25.0e-6, 3.0e-1],
                    ]),
                },
            ],
        }
    }

    /// Load a catalog from a directory of TOML records or a single YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MaterialError> {
        let path = path.as_ref();
        let records = if path.is_dir() {
            read_dir_records(path)?
        } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
            let contents = std::fs::read_to_string(path)?;
            vec![toml::from_str(&contents)?]
        } else {
            let reader = File::open(path)?;
            serde_yaml::from_reader(reader)?
        };
        Ok(Self { records })
    }

    /// Look up a material by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&MaterialRecord, MaterialError> {
        let upper = name.to_uppercase();
        self.records
            .iter()
            .find(|record| record.name.to_uppercase() == upper)
            .ok_or_else(|| MaterialError::NotFound(name.to_string()))
    }

    /// Append a record, replacing any existing entry with the same name.
    pub fn insert(&mut self, record: MaterialRecord) {
        let upper = record.name.to_uppercase();
        self.records
            .retain(|existing| existing.name.to_uppercase() != upper);
        self.records.push(record);
    }

    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

fn read_dir_records(dir: &Path) -> Result<Vec<MaterialRecord>, MaterialError> {
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        records.push(toml::from_str(&contents)?);
    }
    Ok(records)
}
