use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Interaction entry for specs ({0}, {1}) has parameters inconsistent with kind '{2:?}'")]
    MismatchedParams(String, String, InteractionKind),
}

/// The interaction type tag of a force field entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionKind {
    LennardJones,
    LennardJonesReactionField,
    HarmonicBond,
    QuarticBond,
}

impl InteractionKind {
    /// Whether this kind applies to bonded pairs rather than non-bonded ones.
    pub fn is_bonded(self) -> bool {
        matches!(self, Self::HarmonicBond | Self::QuarticBond)
    }
}

/// Numeric coefficients of a force field entry.
///
/// Lennard-Jones style entries carry `C12`/`C6`; bond entries carry an
/// equilibrium length and a force constant.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum InteractionParams {
    LennardJones { c12: f64, c6: f64 },
    Bond { r0: f64, fc: f64 },
}

/// Global force field parameters shared by all entries.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct GlobalParams {
    /// Relative permittivity inside the interaction cutoff.
    pub eps_inside_cutoff: f64,
    /// Relative permittivity of the continuum outside the cutoff.
    pub eps_outside_cutoff: f64,
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            eps_inside_cutoff: 1.0,
            eps_outside_cutoff: 78.5,
        }
    }
}

/// An unordered specification-name pair, the force field lookup key.
///
/// Construction normalizes the ordering, so `("A", "B")` and `("B", "A")`
/// produce equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecPair(String, String);

impl SpecPair {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct InteractionEntry {
    specs: [String; 2],
    kind: InteractionKind,
    #[serde(flatten)]
    params: InteractionParams,
}

#[derive(Debug, Deserialize)]
struct ForceFieldFile {
    #[serde(default)]
    globals: GlobalParams,
    #[serde(default, rename = "interaction")]
    interactions: Vec<InteractionEntry>,
}

/// An immutable force field: interaction coefficients keyed by unordered
/// specification-name pair and interaction kind.
#[derive(Debug, Clone, Default)]
pub struct ForceField {
    pub globals: GlobalParams,
    interactions: HashMap<(SpecPair, InteractionKind), InteractionParams>,
}

impl ForceField {
    /// Creates an empty force field with the given globals.
    pub fn new(globals: GlobalParams) -> Self {
        Self {
            globals,
            interactions: HashMap::new(),
        }
    }

    /// Registers an interaction entry programmatically.
    ///
    /// # Errors
    ///
    /// Returns [`ParamLoadError::MismatchedParams`] when the parameter payload
    /// does not fit the interaction kind (e.g., bond coefficients on a
    /// Lennard-Jones entry).
    pub fn add_interaction(
        &mut self,
        a: &str,
        b: &str,
        kind: InteractionKind,
        params: InteractionParams,
    ) -> Result<(), ParamLoadError> {
        let consistent = match params {
            InteractionParams::LennardJones { .. } => !kind.is_bonded(),
            InteractionParams::Bond { .. } => kind.is_bonded(),
        };
        if !consistent {
            return Err(ParamLoadError::MismatchedParams(
                a.to_string(),
                b.to_string(),
                kind,
            ));
        }
        self.interactions
            .insert((SpecPair::new(a, b), kind), params);
        Ok(())
    }

    /// Looks up the coefficients for a specification-name pair and kind.
    ///
    /// The pair is unordered; a miss returns `None` and is recoverable at the
    /// call site (non-interacting species pairs are common and intentional).
    pub fn lookup(&self, a: &str, b: &str, kind: InteractionKind) -> Option<&InteractionParams> {
        self.interactions.get(&(SpecPair::new(a, b), kind))
    }

    /// Loads a force field from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ParamLoadError::Toml { source, .. } => ParamLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Parses a force field from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ParamLoadError> {
        let file: ForceFieldFile = toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        let mut forcefield = Self::new(file.globals);
        for entry in file.interactions {
            forcefield.add_interaction(&entry.specs[0], &entry.specs[1], entry.kind, entry.params)?;
        }
        Ok(forcefield)
    }
}
