//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - フレームワークに依存しない
//! - トラッキングサーバーやファイル形式について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（ImportUnit, RenameRuleSetなど）
//! - **errors**: 致命的エラーとユニット単位のエラー
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（リネーム解決、ワーカー数ポリシー）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
