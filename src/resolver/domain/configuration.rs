//! Configuration aggregate: sealed versions, blacklist and batch session.

use super::{
    Blacklist, Composition, ConfigurationId, ModuleCatalog, ModuleId, ResolverDomainError,
    ResolverDomainResult, SealedVersion, Version,
    composition::Extension,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An append validated against a configuration but not yet applied.
#[derive(Debug)]
pub(crate) struct PendingAppend {
    opened: Option<BatchSession>,
    extension: Extension,
}

impl PendingAppend {
    /// Module ids the append adds.
    pub(crate) fn modules(&self) -> &[ModuleId] {
        self.extension.modules()
    }

    /// Returns `true` when the append opens a new session.
    pub(crate) const fn opens_session(&self) -> bool {
        self.opened.is_some()
    }
}

/// Observable lifecycle state of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum BatchState {
    /// Never sealed and no batch open.
    New,
    /// A batch session is staging the next version.
    BatchOpen {
        /// Version the batch was seeded from ([`Version::LATEST`] when none).
        base: Version,
        /// Modules appended since the batch opened.
        staged: usize,
    },
    /// The latest sealed version, with no batch open.
    Sealed(Version),
}

/// Transient staging area for the next version of one configuration.
///
/// A session opens seeded with the latest sealed module list and is either
/// sealed into a new version or discarded without residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSession {
    base: Version,
    seeded: usize,
    composition: Composition,
    opened_at: DateTime<Utc>,
}

impl BatchSession {
    fn open(base: Option<&SealedVersion>, opened_at: DateTime<Utc>) -> Self {
        let composition = base.map_or_else(Composition::new, Composition::seeded_from);
        Self {
            base: base.map_or(Version::LATEST, SealedVersion::version),
            seeded: composition.len(),
            composition,
            opened_at,
        }
    }

    /// Returns the version the session was seeded from.
    #[must_use]
    pub const fn base(&self) -> Version {
        self.base
    }

    /// Returns the staged composition, including seeded modules.
    #[must_use]
    pub const fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Returns the module ids appended since the session opened.
    #[must_use]
    pub fn staged(&self) -> &[ModuleId] {
        self.composition
            .modules()
            .get(self.seeded..)
            .unwrap_or_default()
    }

    /// Returns when the session opened.
    #[must_use]
    pub const fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub(crate) fn into_composition(self) -> Composition {
        self.composition
    }
}

/// A named, versioned composition of modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    id: ConfigurationId,
    versions: Vec<SealedVersion>,
    blacklist: Blacklist,
    batch: Option<BatchSession>,
}

impl Configuration {
    /// Creates a configuration with no versions.
    #[must_use]
    pub fn new(id: ConfigurationId) -> Self {
        Self {
            id,
            versions: Vec::new(),
            blacklist: Blacklist::new(),
            batch: None,
        }
    }

    /// Returns the configuration id.
    #[must_use]
    pub const fn id(&self) -> ConfigurationId {
        self.id
    }

    /// Returns the latest sealed version, or [`Version::LATEST`] (zero) when
    /// nothing is sealed.
    #[must_use]
    pub fn latest_version(&self) -> Version {
        self.versions
            .last()
            .map_or(Version::LATEST, SealedVersion::version)
    }

    /// Returns `true` once at least one version is sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        !self.versions.is_empty()
    }

    /// Returns the sealed version selected by `version`.
    ///
    /// [`Version::LATEST`] selects the latest sealed version.
    #[must_use]
    pub fn version(&self, version: Version) -> Option<&SealedVersion> {
        if version.is_latest() {
            return self.versions.last();
        }
        let index = usize::try_from(version.get() - 1).ok()?;
        self.versions.get(index)
    }

    /// Returns every sealed version in order.
    #[must_use]
    pub fn versions(&self) -> &[SealedVersion] {
        &self.versions
    }

    /// Returns the blacklist.
    #[must_use]
    pub const fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Returns the open batch session, if any.
    #[must_use]
    pub const fn batch(&self) -> Option<&BatchSession> {
        self.batch.as_ref()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> BatchState {
        match (&self.batch, self.versions.last()) {
            (Some(session), _) => BatchState::BatchOpen {
                base: session.base(),
                staged: session.staged().len(),
            },
            (None, Some(latest)) => BatchState::Sealed(latest.version()),
            (None, None) => BatchState::New,
        }
    }

    /// Returns `true` when the configuration holds no state at all.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.versions.is_empty() && self.blacklist.is_empty() && self.batch.is_none()
    }

    pub(crate) const fn blacklist_mut(&mut self) -> &mut Blacklist {
        &mut self.blacklist
    }

    /// Validates a single-shot composition of exactly `modules`.
    pub(crate) fn compose(
        &self,
        modules: &[ModuleId],
        catalog: &ModuleCatalog,
        max_modules: usize,
    ) -> ResolverDomainResult<Composition> {
        if self.batch.is_some() {
            return Err(ResolverDomainError::BatchInProgress(self.id));
        }
        let mut composition = Composition::new();
        let extension =
            composition.prepare(self.id, modules, catalog, &self.blacklist, max_modules)?;
        composition.apply(extension);
        if composition.is_empty() {
            return Err(ResolverDomainError::EmptyModuleList(self.id));
        }
        Ok(composition)
    }

    /// Validates an append to the open batch, or to a fresh session seeded
    /// from the latest version, without modifying the configuration.
    pub(crate) fn prepare_append(
        &self,
        modules: &[ModuleId],
        catalog: &ModuleCatalog,
        max_modules: usize,
        opened_at: DateTime<Utc>,
    ) -> ResolverDomainResult<PendingAppend> {
        if let Some(session) = &self.batch {
            let extension =
                session
                    .composition
                    .prepare(self.id, modules, catalog, &self.blacklist, max_modules)?;
            return Ok(PendingAppend {
                opened: None,
                extension,
            });
        }

        let session = BatchSession::open(self.versions.last(), opened_at);
        let extension =
            session
                .composition
                .prepare(self.id, modules, catalog, &self.blacklist, max_modules)?;
        Ok(PendingAppend {
            opened: Some(session),
            extension,
        })
    }

    /// Checks that the batch would be sealable once `pending` is applied.
    ///
    /// Incoming modules were checked against the blacklist by
    /// [`Self::prepare_append`]; only the already-staged ones are re-read.
    pub(crate) fn ensure_sealable_after(
        &self,
        pending: &PendingAppend,
        catalog: &ModuleCatalog,
    ) -> ResolverDomainResult<()> {
        let staged = pending
            .opened
            .as_ref()
            .or(self.batch.as_ref())
            .map(|session| &session.composition);

        if staged.map_or(0, Composition::len) + pending.extension.modules().len() == 0 {
            return Err(ResolverDomainError::EmptyModuleList(self.id));
        }
        staged.map_or(Ok(()), |composition| {
            composition.ensure_allowed(self.id, catalog, &self.blacklist)
        })
    }

    /// Applies a validated append, opening the session when needed.
    pub(crate) fn commit_append(&mut self, pending: PendingAppend) {
        let PendingAppend { opened, extension } = pending;
        if let Some(session) = opened {
            self.batch = Some(session);
        }
        if let Some(session) = self.batch.as_mut() {
            session.composition.apply(extension);
        }
    }

    /// Checks that the open batch can be sealed now.
    pub(crate) fn ensure_batch_sealable(
        &self,
        catalog: &ModuleCatalog,
    ) -> ResolverDomainResult<()> {
        let session = self
            .batch
            .as_ref()
            .ok_or(ResolverDomainError::NoOpenBatch(self.id))?;
        session
            .composition
            .ensure_sealable(self.id, catalog, &self.blacklist)
    }

    /// Removes and returns the open batch session.
    pub(crate) fn take_batch(&mut self) -> ResolverDomainResult<BatchSession> {
        self.batch
            .take()
            .ok_or(ResolverDomainError::NoOpenBatch(self.id))
    }

    /// Seals `composition` as the next version and closes any open batch.
    pub(crate) fn seal(
        &mut self,
        composition: Composition,
        catalog: &ModuleCatalog,
        sealed_at: DateTime<Utc>,
    ) -> Version {
        let next = self.latest_version().next();
        self.versions
            .push(SealedVersion::seal(next, composition, catalog, sealed_at));
        self.batch = None;
        next
    }
}
