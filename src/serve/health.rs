use crate::health::{HealthCheckable, HealthStatus};

pub struct ServeHealth {
    accounts: usize,
}

impl ServeHealth {
    pub fn new(accounts: usize) -> Self {
        Self { accounts }
    }
}

impl HealthCheckable for ServeHealth {
    // The snapshot never changes after startup, an empty one means we were started against the
    // wrong file and every lookup would come back as no allocation.
    fn health_status(&self) -> HealthStatus {
        if self.accounts > 0 {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy(Some("snapshot contains no balances".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_with_accounts_test() {
        assert!(matches!(
            ServeHealth::new(3).health_status(),
            HealthStatus::Healthy
        ));
    }

    #[test]
    fn unhealthy_when_empty_test() {
        assert!(matches!(
            ServeHealth::new(0).health_status(),
            HealthStatus::Unhealthy(Some(_))
        ));
    }
}
