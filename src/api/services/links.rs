use std::sync::Arc;

use actix_web::{HttpResponse, web};
use tracing::{debug, error};

use crate::api::error_response;
use crate::api::types::{
    AddressResponse, LinkRequest, MessageResponse, UpdateRequest, UpdateResponse,
};
use crate::config::AppConfig;
use crate::errors::{LinkError, Result};
use crate::services::LinkService;
use crate::utils::password::SecretVerifier;

/// 创建/更新/删除短链接的 JSON 接口
///
/// 密钥在地址校验之前检查，错误密钥一律返回 401。
/// 请求体本身无法反序列化（缺字段、类型错误）时由 `json_config()`
/// 先返回 400，此时不会进行密钥校验。
pub struct LinkApiService;

impl LinkApiService {
    pub async fn add_link(
        body: web::Json<LinkRequest>,
        service: web::Data<Arc<LinkService>>,
        verifier: web::Data<SecretVerifier>,
        config: web::Data<AppConfig>,
    ) -> HttpResponse {
        let LinkRequest { address, password } = body.into_inner();

        if let Err(e) = Self::authorize(&verifier, password).await {
            return error_response(&e);
        }

        match service.create(&address).await {
            Ok(link) => HttpResponse::Ok().json(AddressResponse {
                address: config.link_path(&link.code()),
            }),
            Err(e) => {
                debug!("Add rejected for {:?}: {}", address, e);
                error_response(&e)
            }
        }
    }

    pub async fn remove_link(
        body: web::Json<LinkRequest>,
        service: web::Data<Arc<LinkService>>,
        verifier: web::Data<SecretVerifier>,
    ) -> HttpResponse {
        let LinkRequest { address, password } = body.into_inner();

        if let Err(e) = Self::authorize(&verifier, password).await {
            return error_response(&e);
        }

        match service.remove(&address).await {
            Ok(_) => HttpResponse::Ok().json(MessageResponse {
                message: "URL removed".to_string(),
            }),
            Err(e) => {
                debug!("Remove rejected for {:?}: {}", address, e);
                error_response(&e)
            }
        }
    }

    pub async fn update_link(
        body: web::Json<UpdateRequest>,
        service: web::Data<Arc<LinkService>>,
        verifier: web::Data<SecretVerifier>,
        config: web::Data<AppConfig>,
    ) -> HttpResponse {
        let UpdateRequest {
            old_address,
            new_address,
            password,
        } = body.into_inner();

        if let Err(e) = Self::authorize(&verifier, password).await {
            return error_response(&e);
        }

        match service.update(&old_address, &new_address).await {
            Ok(link) => HttpResponse::Ok().json(UpdateResponse {
                message: "URL updated".to_string(),
                address: config.link_path(&link.code()),
            }),
            Err(e) => {
                debug!(
                    "Update rejected for {:?} -> {:?}: {}",
                    old_address, new_address, e
                );
                error_response(&e)
            }
        }
    }

    /// Argon2 校验是 CPU 密集操作，放到阻塞线程池执行
    async fn authorize(verifier: &web::Data<SecretVerifier>, password: String) -> Result<()> {
        let verifier = verifier.get_ref().clone();
        let valid = web::block(move || verifier.verify(&password))
            .await
            .map_err(|e| {
                error!("Secret verification task failed: {}", e);
                LinkError::password_hash(e.to_string())
            })?;

        if valid {
            Ok(())
        } else {
            Err(LinkError::unauthorized("Invalid password"))
        }
    }
}
