//! Data provider wallets of a run.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;

/// Freshly generated wallets that register with and submit prices to the oracle.
///
/// The set is created before funding and owned by the run; every later phase borrows it.
#[derive(Clone, Debug, Default)]
pub struct DataProviders {
    signers: Vec<PrivateKeySigner>,
}

impl DataProviders {
    /// Generates `count` random wallets.
    pub fn generate(count: usize) -> Self {
        Self { signers: (0..count).map(|_| PrivateKeySigner::random()).collect() }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrivateKeySigner> {
        self.signers.iter()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.signers.iter().map(PrivateKeySigner::address).collect()
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

impl<'a> IntoIterator for &'a DataProviders {
    type Item = &'a PrivateKeySigner;
    type IntoIter = std::slice::Iter<'a, PrivateKeySigner>;

    fn into_iter(self) -> Self::IntoIter {
        self.signers.iter()
    }
}
