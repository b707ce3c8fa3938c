//! 進捗表示
//!
//! 照合コアの進捗コールバックを indicatif のバーにつなぐ。

use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} {msg}";

pub struct MatchProgress {
    bar: ProgressBar,
}

impl MatchProgress {
    pub fn new(verbose: bool) -> Self {
        // 詳細ログとバーが混ざらないよう、verbose 時は非表示
        let bar = if verbose {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }

    /// コールバック本体: (完了数, 総数)
    pub fn update(&self, completed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}
