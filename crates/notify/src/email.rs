use async_trait::async_trait;
use buzz_core::common::tls::install_crypto_provider;
use buzz_core::notify::error::NotifyError;
use buzz_core::notify::port::Notifier;
use lettre::message::{Mailbox, Message, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::info;

/// # Summary
/// 通过 SMTP 发送报警邮件的通知器（QQ 邮箱、Gmail 等）。
///
/// # Invariants
/// - 发件人即登录账号。
/// - 收件人在每次调用时传入，同一个通知器可以投递给不同地址。
/// - `AsyncSmtpTransport` 在多次投递间复用。
pub struct EmailNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    /// # Summary
    /// 创建 `EmailNotifier`。
    ///
    /// # Logic
    /// 1. 校验发件地址格式。
    /// 2. 以隐式 TLS（`relay`）连接指定主机与端口，并附带登录凭据。
    ///
    /// # Arguments
    /// * `host` - SMTP 主机，如 `smtp.qq.com`。
    /// * `port` - SMTP 端口，隐式 TLS 通常为 465。
    /// * `user` - 登录账号，同时作为发件地址。
    /// * `pass` - 密码或授权码。
    ///
    /// # Returns
    /// * 主机或发件地址非法时返回 `NotifyError::Config`。
    pub fn new(host: &str, port: u16, user: &str, pass: &str) -> Result<Self, NotifyError> {
        install_crypto_provider();

        let from: Mailbox = user
            .parse()
            .map_err(|e| NotifyError::Config(format!("Invalid sender address: {}", e)))?;
        let creds = Credentials::new(user.to_string(), pass.to_string());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| NotifyError::Config(format!("Invalid SMTP host: {}", e)))?
            .port(port)
            .credentials(creds)
            .build();

        Ok(Self { mailer, from })
    }
}

/// 构建纯文本邮件
pub(crate) fn build_message(from: &Mailbox, to: &str, subject: &str, content: &str) -> Result<Message, NotifyError> {
    let to: Mailbox = to
        .parse()
        .map_err(|e| NotifyError::Config(format!("Invalid recipient address: {}", e)))?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(content.to_string())
        .map_err(|e| NotifyError::Platform(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl Notifier for EmailNotifier {
    /// # Summary
    /// 发送一封报警邮件。
    ///
    /// # Logic
    /// 1. 构建纯文本邮件。
    /// 2. 通过 SMTP 会话投递，失败归类为 `Network`。
    async fn notify(&self, to: &str, subject: &str, content: &str) -> Result<(), NotifyError> {
        let email = build_message(&self.from, to, subject, content)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Network(format!("SMTP error: {}", e)))?;

        info!("Email '{}' delivered to {}", subject, to);
        Ok(())
    }
}
