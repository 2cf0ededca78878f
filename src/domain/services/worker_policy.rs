//! # Worker Policy
//!
//! 並列実行数の決定ルール

use std::num::NonZeroUsize;

/// ワーカー数ポリシー
///
/// スレッド実行が無効な場合もワーカー数1のプールとして扱い、
/// 実行経路を1つに保つ。
pub struct WorkerPolicy;

impl WorkerPolicy {
    /// 実行環境の並列度（取得できない場合は1）
    pub fn available_parallelism() -> NonZeroUsize {
        std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
    }

    /// 実効ワーカー数を求める
    ///
    /// # Arguments
    ///
    /// * `threaded` - スレッド実行が有効かどうか
    /// * `requested` - 要求されたワーカー数（`None` の場合は並列度いっぱい）
    pub fn resolve(threaded: bool, requested: Option<usize>) -> NonZeroUsize {
        Self::resolve_with(threaded, requested, Self::available_parallelism())
    }

    /// 並列度を指定して実効ワーカー数を求める
    pub fn resolve_with(
        threaded: bool,
        requested: Option<usize>,
        available: NonZeroUsize,
    ) -> NonZeroUsize {
        if !threaded {
            return NonZeroUsize::MIN;
        }
        let requested = requested.unwrap_or(available.get());
        NonZeroUsize::new(requested.min(available.get())).unwrap_or(NonZeroUsize::MIN)
    }
}
