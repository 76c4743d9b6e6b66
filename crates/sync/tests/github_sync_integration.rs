use buzz_core::sync::port::RemoteSync;
use buzz_sync::github::GithubContentSync;
use std::env;

/// # Summary
/// 集成测试：向真实仓库提交一个测试文件。
///
/// # Logic
/// 1. 加载 .env 中的 `GH_TOKEN` 与 `REPO_NAME`。
/// 2. 连续写两次同一路径，第二次必须走带 `sha` 的覆盖分支。
#[tokio::test]
#[ignore] // 会产生真实提交，仅手动运行
async fn test_write_twice_to_real_repo() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let token = env::var("GH_TOKEN")?;
    let repo = env::var("REPO_NAME")?;

    let sync = GithubContentSync::new(token, repo)?;
    sync.write("data/sync_check.txt", "first\n", "Sync check 1").await?;
    sync.write("data/sync_check.txt", "second\n", "Sync check 2").await?;

    Ok(())
}
