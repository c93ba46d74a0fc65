//! ページめくり状態機械
//!
//! 入力（次へ/前へ/ジャンプ）を受けて現在ページを更新し、
//! 描画に必要な情報（[`BookFrame`]）を純粋関数として計算する。
//! DOMへの反映は components 側で行う。

use crate::config::BookConfig;

/// ナビゲーション要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Previous,
    Jump(usize),
}

/// 受理されたページ遷移
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    pub from: usize,
    pub to: usize,
    /// プロジェクト一覧の先読みを要求するか
    pub load_feed: bool,
}

/// 遷移が受理された後に行う処理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipEffect {
    /// アニメーション終了タイマーの予約
    ScheduleSettle,
    PlaySound,
    LoadFeed,
}

impl Flip {
    /// 実行順に並べた後処理。タイマー予約は常に先頭。
    pub fn effects(&self) -> Vec<FlipEffect> {
        let mut effects = vec![FlipEffect::ScheduleSettle, FlipEffect::PlaySound];
        if self.load_feed {
            effects.push(FlipEffect::LoadFeed);
        }
        effects
    }
}

/// 進行中のアニメーション
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub started_at: f64,
    pub duration_ms: f64,
}

impl Transition {
    pub fn is_due(&self, now: f64) -> bool {
        now - self.started_at >= self.duration_ms
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    current: usize,
    total: usize,
    settle_ms: f64,
    feed_trigger: usize,
    transition: Option<Transition>,
    feed_signalled: bool,
}

impl Pager {
    pub fn new(config: &BookConfig) -> Self {
        Self {
            current: 1,
            total: config.total_pages.max(1),
            settle_ms: f64::from(config.settle_ms),
            feed_trigger: config.feed_trigger_page,
            transition: None,
            feed_signalled: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    pub fn apply(&mut self, command: NavCommand, now: f64) -> Option<Flip> {
        match command {
            NavCommand::Next => self.go_next(now),
            NavCommand::Previous => self.go_previous(now),
            NavCommand::Jump(target) => self.jump_to(target, now),
        }
    }

    pub fn go_next(&mut self, now: f64) -> Option<Flip> {
        if self.current >= self.total {
            return None;
        }
        self.flip_to(self.current + 1, now)
    }

    pub fn go_previous(&mut self, now: f64) -> Option<Flip> {
        if self.current <= 1 {
            return None;
        }
        self.flip_to(self.current - 1, now)
    }

    pub fn jump_to(&mut self, target: usize, now: f64) -> Option<Flip> {
        if target == self.current || target < 1 || target > self.total {
            return None;
        }
        self.flip_to(target, now)
    }

    fn flip_to(&mut self, target: usize, now: f64) -> Option<Flip> {
        if self.is_animating() {
            return None;
        }
        let from = self.current;
        self.begin(now);
        self.current = target;

        let crosses_trigger = from < self.feed_trigger && target >= self.feed_trigger;
        let load_feed = crosses_trigger && !self.feed_signalled;
        if load_feed {
            self.feed_signalled = true;
        }

        Some(Flip { from, to: target, load_feed })
    }

    // ============================================
    // アニメーションのライフサイクル
    // ============================================

    fn begin(&mut self, now: f64) {
        self.transition = Some(Transition {
            started_at: now,
            duration_ms: self.settle_ms,
        });
    }

    /// 所要時間を過ぎていればアニメーションを終了する
    pub fn settle(&mut self, now: f64) -> bool {
        match self.transition {
            Some(t) if t.is_due(now) => {
                self.end();
                true
            }
            _ => false,
        }
    }

    fn end(&mut self) {
        self.transition = None;
    }

    // ============================================
    // 描画情報
    // ============================================

    pub fn frame(&self) -> BookFrame {
        let pages = (1..=self.total)
            .map(|index| PageVisual::derive(index, self.current))
            .collect();
        BookFrame {
            pages,
            indicator: format!("{} / {}", self.current, self.total),
            prev_disabled: self.current <= 1,
            next_disabled: self.current >= self.total,
            progress_percent: self.current as f64 / self.total as f64 * 100.0,
            active_dot: self.current,
        }
    }
}

/// ページの見た目の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBucket {
    Past,
    Current,
    Future,
}

/// 1ページ分あたりの奥行き(px)
pub const DEPTH_STEP_PX: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct PageVisual {
    pub index: usize,
    pub bucket: PageBucket,
    pub depth_px: usize,
}

impl PageVisual {
    pub fn derive(index: usize, current: usize) -> Self {
        let bucket = match index.cmp(&current) {
            std::cmp::Ordering::Less => PageBucket::Past,
            std::cmp::Ordering::Equal => PageBucket::Current,
            std::cmp::Ordering::Greater => PageBucket::Future,
        };
        Self {
            index,
            bucket,
            depth_px: index.abs_diff(current) * DEPTH_STEP_PX,
        }
    }

    pub fn transform(&self) -> String {
        match self.bucket {
            PageBucket::Past => format!("rotateY(-180deg) translateZ({}px)", self.depth_px),
            PageBucket::Current => "translateZ(0px)".to_string(),
            PageBucket::Future => format!("translateZ(-{}px)", self.depth_px),
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self.bucket {
            PageBucket::Past => "page flipped",
            PageBucket::Current => "page current",
            PageBucket::Future => "page",
        }
    }
}

/// 1回の描画で必要な情報一式
#[derive(Debug, Clone, PartialEq)]
pub struct BookFrame {
    pub pages: Vec<PageVisual>,
    pub indicator: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub progress_percent: f64,
    pub active_dot: usize,
}
