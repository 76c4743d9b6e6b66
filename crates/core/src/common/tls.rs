use std::sync::Once;

static INSTALL: Once = Once::new();

/// # Summary
/// 为 `rustls` 安装进程级默认加密后端 (`ring`)。
///
/// # Logic
/// 1. `reqwest` 以 `rustls-no-provider` 方式编译，构建客户端前必须存在默认 Provider。
/// 2. 仅在首次调用时安装；若其他组件已安装，则保持原状。
pub fn install_crypto_provider() {
    INSTALL.call_once(|| {
        if rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
        {
            tracing::debug!("rustls crypto provider already installed");
        }
    });
}
