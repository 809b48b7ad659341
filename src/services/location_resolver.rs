//! Resolución de direcciones jerárquicas
//!
//! País → estados → ciudades mediante búsquedas en cascada. Un fallo de
//! búsqueda se registra y deja la lista dependiente vacía.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

use crate::models::{City, State};
use crate::utils::errors::AppResult;

/// Fuente de estados y ciudades
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn states_by_country(&self, country_id: Uuid) -> AppResult<Vec<State>>;
    async fn cities_by_state(&self, state_id: Uuid) -> AppResult<Vec<City>>;
}

/// Estados y ciudades precargados para un editor
#[derive(Debug, Default, PartialEq)]
pub struct PreloadedHierarchy {
    pub states_by_country: BTreeMap<Uuid, Vec<State>>,
    pub cities_by_state: BTreeMap<Uuid, Vec<City>>,
}

pub struct LocationResolver<L> {
    lookup: L,
}

impl<L: LocationLookup> LocationResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub async fn states(&self, country_id: Uuid) -> Vec<State> {
        self.lookup
            .states_by_country(country_id)
            .await
            .unwrap_or_else(|e| {
                warn!("⚠️ No se pudieron cargar estados del país {}: {}", country_id, e);
                Vec::new()
            })
    }

    pub async fn cities(&self, state_id: Uuid) -> Vec<City> {
        self.lookup.cities_by_state(state_id).await.unwrap_or_else(|e| {
            warn!("⚠️ No se pudieron cargar ciudades del estado {}: {}", state_id, e);
            Vec::new()
        })
    }

    /// Precargar la jerarquía de varias ubicaciones sin repetir búsquedas
    pub async fn preload<I>(&self, pairs: I) -> PreloadedHierarchy
    where
        I: IntoIterator<Item = (Uuid, Uuid)>,
    {
        let mut preloaded = PreloadedHierarchy::default();

        for (country_id, state_id) in pairs {
            if !preloaded.states_by_country.contains_key(&country_id) {
                let states = self.states(country_id).await;
                preloaded.states_by_country.insert(country_id, states);
            }
            if !preloaded.cities_by_state.contains_key(&state_id) {
                let cities = self.cities(state_id).await;
                preloaded.cities_by_state.insert(state_id, cities);
            }
        }

        preloaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingLookup {
        state_calls: AtomicUsize,
        city_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl LocationLookup for CountingLookup {
        async fn states_by_country(&self, country_id: Uuid) -> AppResult<Vec<State>> {
            self.state_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Internal("lookup down".to_string()));
            }
            Ok(vec![State {
                id: Uuid::new_v4(),
                country_id,
                name: "Ontario".to_string(),
                code: "ON".to_string(),
            }])
        }

        async fn cities_by_state(&self, state_id: Uuid) -> AppResult<Vec<City>> {
            self.city_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::Internal("lookup down".to_string()));
            }
            Ok(vec![City {
                id: Uuid::new_v4(),
                state_id,
                name: "Toronto".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_preload_deduplicates_lookups() {
        let country = Uuid::new_v4();
        let ontario = Uuid::new_v4();
        let quebec = Uuid::new_v4();
        let resolver = LocationResolver::new(CountingLookup::default());

        let preloaded = resolver
            .preload(vec![(country, ontario), (country, ontario), (country, quebec)])
            .await;

        assert_eq!(resolver.lookup.state_calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.lookup.city_calls.load(Ordering::SeqCst), 2);
        assert_eq!(preloaded.states_by_country.len(), 1);
        assert_eq!(preloaded.cities_by_state.len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_failure_yields_empty_list() {
        let resolver = LocationResolver::new(CountingLookup {
            fail: true,
            ..Default::default()
        });

        assert!(resolver.states(Uuid::new_v4()).await.is_empty());
        assert!(resolver.cities(Uuid::new_v4()).await.is_empty());
    }
}
