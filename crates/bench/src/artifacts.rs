//! Compiled contract artifacts, one per chain kind.

use crate::error::{BenchError, BenchResult};
use alloy_json_abi::JsonAbi;
use alloy_primitives::Bytes;
use eyre::{Result, WrapErr};
use oracle_bench_config::{ArtifactPaths, ChainKind};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// ABI and creation bytecode of the oracle.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContractArtifact {
    pub abi: JsonAbi,
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Reads a Hardhat artifact file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read artifact {}", path.display()))?;
        let artifact: Self = serde_json::from_str(&content)
            .wrap_err_with(|| format!("failed to parse artifact {}", path.display()))?;
        if artifact.bytecode.is_empty() {
            eyre::bail!("artifact {} has no bytecode", path.display());
        }
        Ok(artifact)
    }
}

/// Artifacts loaded at startup, looked up by the kind of the target chain.
#[derive(Clone, Debug, Default)]
pub struct ArtifactRegistry {
    artifacts: HashMap<ChainKind, ContractArtifact>,
}

impl ArtifactRegistry {
    /// Loads every artifact in `paths` that exists on disk.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let mut registry = Self::default();
        for kind in [ChainKind::Evm, ChainKind::ZkSync] {
            let path = paths.for_kind(kind);
            if !path.exists() {
                debug!(%kind, path = %path.display(), "artifact not found, skipping");
                continue;
            }
            registry.insert(kind, ContractArtifact::from_file(path)?);
            trace!(%kind, path = %path.display(), "loaded artifact");
        }
        Ok(registry)
    }

    pub fn insert(&mut self, kind: ChainKind, artifact: ContractArtifact) {
        self.artifacts.insert(kind, artifact);
    }

    /// Returns the artifact to deploy on a chain of the given kind.
    pub fn get(&self, kind: ChainKind) -> BenchResult<&ContractArtifact> {
        self.artifacts.get(&kind).ok_or(BenchError::MissingArtifact(kind))
    }
}
