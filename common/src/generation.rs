//! 非同期リクエストの世代管理
//!
//! リクエスト開始ごとに世代番号を進め、完了時に番号が最新でなければ結果を捨てる。

/// 発行済みリクエストの世代番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// 世代カウンタ
#[derive(Debug, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいリクエストを開始（以前のチケットは無効になる）
    pub fn next(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    /// 進行中のリクエストをすべて無効化
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    /// チケットが最新か
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}
