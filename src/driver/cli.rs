//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::mlflow::client::DEFAULT_TRACKING_URI;

/// エクスポートディレクトリからエクスペリメントを一括インポートするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "expimport")]
#[command(about = "Import a list of experiments from an export directory", long_about = None)]
pub struct Args {
    /// Input directory containing experiments.json and one sub-directory per experiment
    #[arg(long)]
    pub input_dir: String,

    /// Import experiment permissions
    #[arg(long)]
    pub import_permissions: bool,

    /// Import source information as tags
    #[arg(long)]
    pub import_source_tags: bool,

    /// Keep the source user id
    #[arg(long)]
    pub use_src_user_id: bool,

    /// File with experiment rename rules (pattern,replacement[,kind] per line)
    #[arg(long)]
    pub experiment_rename_file: Option<String>,

    /// Import experiments in parallel
    #[arg(long)]
    pub use_threads: bool,

    /// Upper bound on parallel imports when --use-threads is set
    #[arg(long)]
    pub max_workers: Option<usize>,

    /// Tracking server URI
    #[arg(long, env = "MLFLOW_TRACKING_URI", default_value = DEFAULT_TRACKING_URI)]
    pub tracking_uri: String,

    /// Bearer token for the tracking server
    #[arg(long, env = "MLFLOW_TRACKING_TOKEN", hide_env_values = true)]
    pub tracking_token: Option<String>,
}

impl Args {
    /// 起動時にログへ出力するオプション一覧（トークンは伏せる）
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("input_dir", self.input_dir.clone()),
            ("import_permissions", self.import_permissions.to_string()),
            ("import_source_tags", self.import_source_tags.to_string()),
            ("use_src_user_id", self.use_src_user_id.to_string()),
            (
                "experiment_rename_file",
                format!("{:?}", self.experiment_rename_file),
            ),
            ("use_threads", self.use_threads.to_string()),
            ("max_workers", format!("{:?}", self.max_workers)),
            ("tracking_uri", self.tracking_uri.clone()),
            (
                "tracking_token",
                if self.tracking_token.is_some() { "****" } else { "None" }.to_string(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["expimport", "--input-dir", "/data/export"]);
        assert_eq!(args.input_dir, "/data/export");
        assert!(!args.import_permissions);
        assert!(!args.import_source_tags);
        assert!(!args.use_src_user_id);
        assert!(args.experiment_rename_file.is_none());
        assert!(!args.use_threads);
        assert!(args.max_workers.is_none());
    }

    #[test]
    fn test_args_input_dir_required() {
        let result = Args::try_parse_from(["expimport"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_args_flags() {
        let args = Args::parse_from([
            "expimport",
            "--input-dir",
            "/in",
            "--import-permissions",
            "--import-source-tags",
            "--use-src-user-id",
            "--use-threads",
            "--max-workers",
            "4",
        ]);
        assert!(args.import_permissions);
        assert!(args.import_source_tags);
        assert!(args.use_src_user_id);
        assert!(args.use_threads);
        assert_eq!(args.max_workers, Some(4));
    }

    #[test]
    fn test_args_rename_file_and_tracking_uri() {
        let args = Args::parse_from([
            "expimport",
            "--input-dir",
            "/in",
            "--experiment-rename-file",
            "renames.csv",
            "--tracking-uri",
            "http://mlflow:5000",
        ]);
        assert_eq!(args.experiment_rename_file.as_deref(), Some("renames.csv"));
        assert_eq!(args.tracking_uri, "http://mlflow:5000");
    }

    #[test]
    fn test_describe_hides_token() {
        let args = Args::parse_from([
            "expimport",
            "--input-dir",
            "/in",
            "--tracking-token",
            "secret",
        ]);
        let described = args.describe();
        let token = described
            .iter()
            .find(|(key, _)| *key == "tracking_token")
            .map(|(_, value)| value.as_str());
        assert_eq!(token, Some("****"));
        assert!(described.iter().all(|(_, value)| !value.contains("secret")));
    }
}
