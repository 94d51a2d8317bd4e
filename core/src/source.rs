use crate::NoiseModule;
use crate::error::{NoiseError, Result};

// Fixed set of borrowed source-module slots for a module taking `N` inputs.
//
// Slots start empty. The borrow ties every source to lifetime `'a`, so a
// source always outlives the module reading it, and a module can never be
// wired (directly or transitively) into its own inputs.
#[derive(Clone, Copy)]
pub struct SourceSlots<'a, const N: usize> {
    owner: &'static str,
    slots: [Option<&'a dyn NoiseModule>; N],
}

impl<'a, const N: usize> SourceSlots<'a, N> {
    pub fn new(owner: &'static str) -> Self {
        Self {
            owner,
            slots: [None; N],
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn set(&mut self, index: usize, module: &'a dyn NoiseModule) -> Result<()> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(NoiseError::SourceIndexOutOfRange {
                module: self.owner,
                index,
                count: N,
            })?;
        *slot = Some(module);
        Ok(())
    }

    // Slot index checked at compile time, so wiring a fixed slot cannot fail
    pub fn set_slot<const I: usize>(&mut self, module: &'a dyn NoiseModule) {
        const { assert!(I < N, "source slot index out of range") };
        self.slots[I] = Some(module);
    }

    // The module wired into `index`, or `NoSource` if it was never set.
    pub fn get(&self, index: usize) -> Result<&'a dyn NoiseModule> {
        match self.slots.get(index) {
            Some(Some(module)) => Ok(*module),
            Some(None) => Err(NoiseError::NoSource {
                module: self.owner,
                index,
            }),
            None => Err(NoiseError::SourceIndexOutOfRange {
                module: self.owner,
                index,
                count: N,
            }),
        }
    }
}

// Source accessors plus a `Default` deferring to `new()` for modules that keep
// their inputs in a `sources: SourceSlots` field
macro_rules! source_module_accessors {
    ($($module:ident),+ $(,)?) => {
        $(
            impl<'a> $module<'a> {
                pub fn set_source_module(
                    &mut self,
                    index: usize,
                    module: &'a dyn $crate::NoiseModule,
                ) -> $crate::Result<()> {
                    self.sources.set(index, module)
                }

                pub fn source_module(
                    &self,
                    index: usize,
                ) -> $crate::Result<&'a dyn $crate::NoiseModule> {
                    self.sources.get(index)
                }
            }

            impl Default for $module<'_> {
                fn default() -> Self {
                    Self::new()
                }
            }
        )+
    };
}

pub(crate) use source_module_accessors;
