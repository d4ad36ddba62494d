use crate::error::ApiError;
use async_trait::async_trait;

/// Trait for services that can list resources
#[async_trait]
pub trait ListService<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError>;
}

/// Trait for services that can retrieve individual resources
#[async_trait]
pub trait GetService<T> {
    async fn get(&self, id: i64) -> Result<T, ApiError>;
}

/// Trait for services that can look up a resource by business code
#[async_trait]
pub trait GetByCodeService<T> {
    async fn lookup_code(&self, code: &str) -> Result<T, ApiError>;
}

/// Trait for services that can delete resources
#[async_trait]
pub trait DeleteService {
    async fn delete_by_id(&self, id: i64) -> Result<(), ApiError>;
}

/// Implement ListService by forwarding to the service's `get_all`
#[macro_export]
macro_rules! impl_list_service {
    ($service:ty, $item_type:ty) => {
        #[async_trait::async_trait]
        impl $crate::core::services::traits::ListService<$item_type> for $service {
            async fn list(&self) -> Result<Vec<$item_type>, $crate::error::ApiError> {
                self.get_all().await
            }
        }
    };
}

/// Implement GetService by forwarding to the service's `get_by_id`
#[macro_export]
macro_rules! impl_get_service {
    ($service:ty, $item_type:ty) => {
        #[async_trait::async_trait]
        impl $crate::core::services::traits::GetService<$item_type> for $service {
            async fn get(&self, id: i64) -> Result<$item_type, $crate::error::ApiError> {
                self.get_by_id(id).await
            }
        }
    };
}

/// Implement GetByCodeService by forwarding to the service's `get_by_code`
#[macro_export]
macro_rules! impl_get_by_code_service {
    ($service:ty, $item_type:ty) => {
        #[async_trait::async_trait]
        impl $crate::core::services::traits::GetByCodeService<$item_type> for $service {
            async fn lookup_code(&self, code: &str) -> Result<$item_type, $crate::error::ApiError> {
                self.get_by_code(code).await
            }
        }
    };
}

/// Implement DeleteService by forwarding to the service's `delete`
#[macro_export]
macro_rules! impl_delete_service {
    ($service:ty) => {
        #[async_trait::async_trait]
        impl $crate::core::services::traits::DeleteService for $service {
            async fn delete_by_id(&self, id: i64) -> Result<(), $crate::error::ApiError> {
                self.delete(id).await
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockService;

    #[async_trait]
    impl ListService<String> for MockService {
        async fn list(&self) -> Result<Vec<String>, ApiError> {
            Ok(vec!["item1".to_string(), "item2".to_string()])
        }
    }

    #[async_trait]
    impl GetService<String> for MockService {
        async fn get(&self, _id: i64) -> Result<String, ApiError> {
            Ok("test_item".to_string())
        }
    }

    #[tokio::test]
    async fn test_list_service() {
        let service = MockService;
        let result = service.list().await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_service() {
        let service = MockService;
        let result = service.get(1).await;
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "test_item");
    }
}
