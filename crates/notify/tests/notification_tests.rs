use buzz_core::notify::port::Notifier;
use buzz_notify::email::EmailNotifier;
use std::env;

/// # Summary
/// 集成测试：验证 Email 通知发送功能。
///
/// # Logic
/// 1. 加载 .env 环境变量。
/// 2. 从环境变量获取 SMTP 账号与收件人。
/// 3. 初始化 EmailNotifier。
/// 4. 发送测试邮件并断言结果。
#[tokio::test]
#[ignore] // 默认忽略，仅在手动测试时通过环境变量开启
async fn test_email_notification() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let host = env::var("BUZZ_SMTP_HOST").unwrap_or_else(|_| "smtp.qq.com".to_string());
    let user = env::var("EMAIL_USER")?;
    let pass = env::var("EMAIL_PASS")?;
    let to = env::var("RECEIVER_EMAIL")?;

    let notifier = EmailNotifier::new(&host, 465, &user, &pass)?;
    notifier
        .notify(&to, "Buzz 测试", "这是一条来自 Email 集成测试的消息")
        .await?;

    Ok(())
}
