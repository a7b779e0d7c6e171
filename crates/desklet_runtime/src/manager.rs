//! Owns every desklet of a session and broadcasts resize/refresh/close across them.

use std::collections::BTreeMap;

use desklet_host::HostServices;

use crate::{
    controller::{DeskletController, ShellMode},
    model::{DeskletConfig, DeskletId, DeskletState},
    reducer::{DeskletEffect, DeskletError},
};

/// DOM id prefix for desklet containers.
pub const DESKLET_DOM_ID_PREFIX: &str = "desklet_";

pub struct DeskletManager {
    host: HostServices,
    mode: ShellMode,
    desklets: BTreeMap<DeskletId, DeskletController>,
    next_id: u64,
}

impl std::fmt::Debug for DeskletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskletManager")
            .field("mode", &self.mode)
            .field("desklets", &self.desklets)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl DeskletManager {
    pub fn new(host: HostServices, mode: ShellMode) -> Self {
        Self {
            host,
            mode,
            desklets: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn host(&self) -> &HostServices {
        &self.host
    }

    pub fn shell_mode(&self) -> ShellMode {
        self.mode
    }

    /// First `desklet_<n>` not used by a live desklet.
    fn next_dom_id(&self) -> String {
        (0..)
            .map(|n| format!("{DESKLET_DOM_ID_PREFIX}{n}"))
            .find(|candidate| {
                !self
                    .desklets
                    .values()
                    .any(|desklet| desklet.state().dom_id == *candidate)
            })
            .unwrap_or_else(|| format!("{DESKLET_DOM_ID_PREFIX}{}", self.next_id))
    }

    /// Creates a desklet and runs its first layout pass.
    pub fn create_desklet(&mut self, config: DeskletConfig) -> DeskletId {
        let id = DeskletId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let dom_id = self.next_dom_id();
        let mut desklet = DeskletController::new(id, dom_id, config, self.mode, self.host.clone());
        desklet.refresh();
        self.desklets.insert(id, desklet);
        id
    }

    /// # Errors
    ///
    /// Returns [`DeskletError::DeskletNotFound`] for unknown ids.
    pub fn get(&self, id: DeskletId) -> Result<&DeskletController, DeskletError> {
        self.desklets.get(&id).ok_or(DeskletError::DeskletNotFound)
    }

    /// # Errors
    ///
    /// Returns [`DeskletError::DeskletNotFound`] for unknown ids.
    pub fn get_mut(&mut self, id: DeskletId) -> Result<&mut DeskletController, DeskletError> {
        self.desklets
            .get_mut(&id)
            .ok_or(DeskletError::DeskletNotFound)
    }

    pub fn ids(&self) -> Vec<DeskletId> {
        self.desklets.keys().copied().collect()
    }

    /// Clones every desklet's state, keyed by id.
    pub fn states(&self) -> BTreeMap<DeskletId, DeskletState> {
        self.desklets
            .iter()
            .map(|(id, desklet)| (*id, desklet.state().clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.desklets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desklets.is_empty()
    }

    /// Re-samples geometry and re-runs layout for every desklet.
    pub fn refresh_all(&mut self) {
        for desklet in self.desklets.values_mut() {
            desklet.refresh();
        }
    }

    /// Viewport resize: every desklet is laid out again, no dirty tracking.
    pub fn resize_all(&mut self) {
        self.refresh_all();
    }

    /// Applies new shell presentation flags to every desklet.
    pub fn set_shell_mode(&mut self, mode: ShellMode) {
        self.mode = mode;
        for desklet in self.desklets.values_mut() {
            desklet.set_shell_mode(mode);
        }
    }

    /// Closes every open mobile overlay. Does nothing on desktop.
    pub fn close_all(&mut self) {
        if !self.mode.mobile {
            return;
        }
        for desklet in self.desklets.values_mut() {
            desklet.close_desklet();
        }
    }

    /// Drains every desklet's pending effects, tagged with their owner.
    pub fn drain_effects(&mut self) -> Vec<(DeskletId, DeskletEffect)> {
        self.desklets
            .iter_mut()
            .flat_map(|(id, desklet)| {
                desklet
                    .drain_effects()
                    .into_iter()
                    .map(move |effect| (*id, effect))
            })
            .collect()
    }
}
