//! マテリアライズドパス（組織単位コード）の読み取り専用ヘルパー
//!
//! コードの採番・付け替えは呼び出し側のドメインサービスが行う。
//! ここでは「親コード + 区切り文字 + セグメント」という形のコードを解釈するだけ。

/// 既定のセグメント区切り文字（例: `00.01.01`）
pub const DEFAULT_SEPARATOR: char = '.';

/// `ancestor` が `code` の祖先または自身であれば true
pub fn is_ancestor_or_self(ancestor: &str, code: &str) -> bool {
    code.starts_with(ancestor)
}

/// `ancestor` が `code` の真の祖先であれば true
pub fn is_proper_ancestor(ancestor: &str, code: &str) -> bool {
    code.len() > ancestor.len() && code.starts_with(ancestor)
}

pub fn segments(code: &str, separator: char) -> Vec<&str> {
    code.split(separator).filter(|s| !s.is_empty()).collect()
}

/// 階層の深さ。ルート直下は 1
pub fn depth(code: &str, separator: char) -> usize {
    segments(code, separator).len()
}

/// 親のコード。ルートのコードには親がないので `None`
pub fn parent_code(code: &str, separator: char) -> Option<&str> {
    code.rfind(separator).map(|idx| &code[..idx])
}
