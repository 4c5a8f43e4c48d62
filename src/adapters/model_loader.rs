use crate::config::BackendMode;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of backend initialisation, decided once at startup.
pub enum ModelLoad<T: ?Sized> {
    Remote { backend: Arc<T>, model_id: String },
    /// Local heuristic; `reason` is set when it replaced a remote model.
    Heuristic {
        backend: Arc<T>,
        reason: Option<String>,
    },
    Unavailable { reason: String },
}

impl<T: ?Sized> ModelLoad<T> {
    pub fn heuristic(backend: Arc<T>) -> Self {
        Self::Heuristic {
            backend,
            reason: None,
        }
    }

    pub fn backend(&self) -> Option<&Arc<T>> {
        match self {
            Self::Remote { backend, .. } | Self::Heuristic { backend, .. } => Some(backend),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, Self::Unavailable { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Remote { model_id, .. } => format!("remote model {}", model_id),
            Self::Heuristic { reason: None, .. } => "local heuristic".to_string(),
            Self::Heuristic {
                reason: Some(reason),
                ..
            } => format!("local heuristic (fallback: {})", reason),
            Self::Unavailable { reason } => format!("unavailable ({})", reason),
        }
    }
}

/// A remote model that can be probed before it is put into service.
#[async_trait]
pub trait WarmUp: Send + Sync {
    async fn warm_up(&self) -> Result<()>;

    fn model_id(&self) -> &str;
}

/// Picks the first remote candidate that answers a warm-up request, falling
/// back to the local heuristic when `mode` allows it.
pub async fn load_backend<T, W>(
    mode: BackendMode,
    candidates: Vec<W>,
    upcast: impl Fn(W) -> Arc<T>,
    heuristic: impl FnOnce() -> Result<Arc<T>>,
) -> ModelLoad<T>
where
    T: ?Sized,
    W: WarmUp,
{
    let local = |reason: Option<String>| match heuristic() {
        Ok(backend) => ModelLoad::Heuristic { backend, reason },
        Err(e) => {
            tracing::error!("❌ Heuristic backend failed to initialise: {}", e);
            ModelLoad::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    if mode == BackendMode::Heuristic {
        tracing::info!("Using local heuristic backend");
        return local(None);
    }

    if candidates.is_empty() {
        return match mode {
            BackendMode::Remote => ModelLoad::Unavailable {
                reason: "no inference endpoint configured".to_string(),
            },
            _ => {
                tracing::info!("No inference endpoint configured, using local heuristic backend");
                local(None)
            }
        };
    }

    let mut failures = Vec::new();
    for candidate in candidates {
        let model_id = candidate.model_id().to_string();
        tracing::info!("Loading model: {}", model_id);

        match candidate.warm_up().await {
            Ok(()) => {
                tracing::info!("✅ Model {} loaded successfully", model_id);
                return ModelLoad::Remote {
                    backend: upcast(candidate),
                    model_id,
                };
            }
            Err(e) => {
                tracing::warn!("❌ Failed to load model {}: {}", model_id, e);
                failures.push(format!("{}: {}", model_id, e));
            }
        }
    }

    let reason = failures.join("; ");
    match mode {
        BackendMode::Remote => {
            tracing::error!("❌ No model could be loaded: {}", reason);
            ModelLoad::Unavailable { reason }
        }
        _ => {
            tracing::warn!("Falling back to local heuristic backend");
            local(Some(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PipelineError;

    trait Backend: Send + Sync {
        fn id(&self) -> String;
    }

    struct Probe {
        id: &'static str,
        healthy: bool,
    }

    impl Backend for Probe {
        fn id(&self) -> String {
            self.id.to_string()
        }
    }

    #[async_trait]
    impl WarmUp for Probe {
        async fn warm_up(&self) -> Result<()> {
            if self.healthy {
                Ok(())
            } else {
                Err(PipelineError::inference("probe rejected"))
            }
        }

        fn model_id(&self) -> &str {
            self.id
        }
    }

    fn local() -> Result<Arc<dyn Backend>> {
        Ok(Arc::new(Probe {
            id: "heuristic",
            healthy: true,
        }))
    }

    fn upcast(p: Probe) -> Arc<dyn Backend> {
        Arc::new(p)
    }

    fn probes(primary: bool, fallback: bool) -> Vec<Probe> {
        vec![
            Probe {
                id: "primary",
                healthy: primary,
            },
            Probe {
                id: "fallback",
                healthy: fallback,
            },
        ]
    }

    #[tokio::test]
    async fn first_healthy_candidate_wins() {
        let load = load_backend(BackendMode::Auto, probes(false, true), upcast, local).await;
        assert!(load.is_remote());
        assert_eq!(load.backend().unwrap().id(), "fallback");
    }

    #[tokio::test]
    async fn auto_mode_falls_back_to_heuristic() {
        let load = load_backend(BackendMode::Auto, probes(false, false), upcast, local).await;
        assert!(load.is_loaded());
        assert!(!load.is_remote());
        assert!(load.describe().contains("primary: "));
    }

    #[tokio::test]
    async fn remote_mode_never_falls_back() {
        let load = load_backend(BackendMode::Remote, probes(false, false), upcast, local).await;
        assert!(!load.is_loaded());
        assert!(load.backend().is_none());
    }

    #[tokio::test]
    async fn heuristic_mode_skips_probing() {
        let load = load_backend(BackendMode::Heuristic, probes(true, true), upcast, local).await;
        assert_eq!(load.backend().unwrap().id(), "heuristic");
    }
}
