//! 入力フィルタ
//!
//! キー・スワイプ・ホイールのイベント値を [`NavCommand`] に変換する。

use crate::config::SwipeConfig;
use crate::pager::NavCommand;

pub fn command_for_key(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowRight" => Some(NavCommand::Next),
        "ArrowLeft" => Some(NavCommand::Previous),
        _ => None,
    }
}

/// 左右のクリック領域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickZone {
    Left,
    Right,
}

impl ClickZone {
    pub fn command(self) -> NavCommand {
        match self {
            ClickZone::Left => NavCommand::Previous,
            ClickZone::Right => NavCommand::Next,
        }
    }
}

/// スワイプ判定
///
/// 横移動が閾値を超え、かつ縦移動の `ratio` 倍を超えた時だけページをめくる。
/// 右方向は前へ、左方向は次へ。
pub fn command_for_swipe(
    swipe: &SwipeConfig,
    dx: f64,
    dy: f64,
    viewport_width: f64,
) -> Option<NavCommand> {
    let threshold = if viewport_width < swipe.narrow_breakpoint {
        swipe.narrow_threshold
    } else {
        swipe.wide_threshold
    };
    if dx.abs() > threshold && dx.abs() > dy.abs() * swipe.ratio {
        if dx > 0.0 {
            Some(NavCommand::Previous)
        } else {
            Some(NavCommand::Next)
        }
    } else {
        None
    }
}

/// スクロール領域の状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// 内側の領域がスクロールできる時だけホイールイベントを止める
pub fn should_contain_wheel(metrics: ScrollMetrics, delta_y: f64) -> bool {
    let max_top = metrics.scroll_height - metrics.client_height;
    let has_overflow = max_top > 0.0;
    let can_scroll_up = delta_y < 0.0 && metrics.scroll_top > 0.0;
    let can_scroll_down = delta_y > 0.0 && metrics.scroll_top < max_top;
    has_overflow && (can_scroll_up || can_scroll_down)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys() {
        assert_eq!(command_for_key("ArrowRight"), Some(NavCommand::Next));
        assert_eq!(command_for_key("ArrowLeft"), Some(NavCommand::Previous));
        assert_eq!(command_for_key("ArrowUp"), None);
        assert_eq!(command_for_key("Enter"), None);
    }

    #[test]
    fn test_click_zones() {
        assert_eq!(ClickZone::Left.command(), NavCommand::Previous);
        assert_eq!(ClickZone::Right.command(), NavCommand::Next);
    }

    #[test]
    fn test_swipe_thresholds_adapt_to_viewport() {
        let swipe = SwipeConfig::default();
        // 狭い画面では80pxで反応、広い画面では反応しない
        assert_eq!(command_for_swipe(&swipe, -80.0, 0.0, 400.0), Some(NavCommand::Next));
        assert_eq!(command_for_swipe(&swipe, -80.0, 0.0, 1200.0), None);
        assert_eq!(command_for_swipe(&swipe, 120.0, 10.0, 1200.0), Some(NavCommand::Previous));
    }

    #[test]
    fn test_swipe_rejects_diagonal() {
        let swipe = SwipeConfig::default();
        // 横150, 縦60 → 3倍に満たない
        assert_eq!(command_for_swipe(&swipe, 150.0, 60.0, 1200.0), None);
        assert_eq!(command_for_swipe(&swipe, 150.0, -49.0, 1200.0), Some(NavCommand::Previous));
    }

    #[test]
    fn test_wheel_containment() {
        let middle = ScrollMetrics { scroll_top: 50.0, scroll_height: 500.0, client_height: 200.0 };
        assert!(should_contain_wheel(middle, 10.0));
        assert!(should_contain_wheel(middle, -10.0));

        let top = ScrollMetrics { scroll_top: 0.0, ..middle };
        assert!(!should_contain_wheel(top, -10.0));
        assert!(should_contain_wheel(top, 10.0));

        let bottom = ScrollMetrics { scroll_top: 300.0, ..middle };
        assert!(!should_contain_wheel(bottom, 10.0));

        let no_overflow = ScrollMetrics { scroll_top: 0.0, scroll_height: 200.0, client_height: 200.0 };
        assert!(!should_contain_wheel(no_overflow, 10.0));
    }
}
