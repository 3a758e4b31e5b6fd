use axum::extract::FromRef;
use fxhash::FxHashMap;
use leadform_domain::config::ApiConfig;
use leadform_domain::registry::{FeatureSlice, InitializedSlice};
use std::any::TypeId;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

#[leadform_derive::leadform_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State missing feature slice{}: {message}", format_context(.context))]
    MissingSlice { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub config: ApiConfig,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

/// Immutable state shared by every request: configuration and the registered slices.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }

    #[must_use]
    pub fn get_slice<T: FeatureSlice>(&self) -> Option<&T> {
        self.inner.slices.get(&TypeId::of::<T>()).and_then(InitializedSlice::downcast_ref::<T>)
    }

    /// Returns a reference to the slice if it is registered.
    ///
    /// # Errors
    /// Returns an error if the slice is not registered.
    pub fn try_get_slice<T: FeatureSlice>(&self) -> Result<&T, ApiStateError> {
        self.get_slice::<T>().ok_or_else(|| ApiStateError::MissingSlice {
            message: std::any::type_name::<T>().into(),
            context: None,
        })
    }

    /// Iterates over registered slice type IDs (for diagnostics).
    pub fn slice_ids(&self) -> impl Iterator<Item = &TypeId> {
        self.inner.slices.keys()
    }

    /// Names of the registered slices, sorted.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.inner.slices.values().map(|s| s.state.name()).collect();
        names.sort_unstable();
        names
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for ApiConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.config.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    config: Option<ApiConfig>,
    slices: FxHashMap<TypeId, InitializedSlice>,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn register_slice(mut self, slice: InitializedSlice) -> Self {
        self.slices.insert(slice.id, slice);
        self
    }

    /// Registers multiple slices at once.
    #[must_use]
    pub fn register_slices<I>(self, slices: I) -> Self
    where
        I: IntoIterator<Item = InitializedSlice>,
    {
        slices.into_iter().fold(self, Self::register_slice)
    }

    /// Finalizes the state.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] when no configuration was supplied.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let config = self.config.ok_or_else(|| ApiStateError::Validation {
            message: "ApiConfig not provided".into(),
            context: None,
        })?;

        Ok(ApiState { inner: Arc::new(ApiStateInner { config, slices: self.slices }) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;

    #[derive(Debug)]
    struct Counter(u8);

    impl FeatureSlice for Counter {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn name(&self) -> &'static str {
            "counter"
        }
    }

    #[test]
    fn registered_slice_is_found_by_type() {
        let state = ApiState::builder()
            .config(ApiConfig::default())
            .register_slice(InitializedSlice::new(Counter(7)))
            .build()
            .expect("state");

        assert_eq!(state.get_slice::<Counter>().map(|p| p.0), Some(7));
        assert_eq!(state.slice_ids().count(), 1);
        assert_eq!(state.feature_names(), ["counter"]);
    }

    #[test]
    fn missing_slice_is_reported() {
        let state = ApiState::builder().config(ApiConfig::default()).build().expect("state");
        let err = state.try_get_slice::<Counter>().expect_err("no slice registered");
        assert!(matches!(err, ApiStateError::MissingSlice { .. }));
    }

    #[test]
    fn build_requires_config() {
        let err = ApiState::builder().build().expect_err("config is mandatory");
        assert!(matches!(err, ApiStateError::Validation { .. }));
    }
}
