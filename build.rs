fn main() {
    // GitHubアカウント名をビルド時に埋め込む（未指定ならデフォルト）
    let user = std::env::var("BOOK_GITHUB_USER")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "Monotheist0".to_string());

    println!("cargo:warning=BOOK_GITHUB_USER set to {}", user);
    println!("cargo:rustc-env=BOOK_GITHUB_USER={}", user);

    // 環境変数変更時に再ビルド
    println!("cargo:rerun-if-env-changed=BOOK_GITHUB_USER");
}
