//! Shared UI constants such as colors, panel sizing, and scripts.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_PRIMARY: &str = "#3b82f6";
pub const ACCENT_ERROR: &str = "#ef4444";
pub const ACCENT_PLAYHEAD: &str = "#f97316";

// Category accents
pub const ACCENT_GESTURES: &str = "#a855f7";
pub const ACCENT_INFLECTION: &str = "#3b82f6";
pub const ACCENT_CLARITY: &str = "#22c55e";
pub const ACCENT_CONTENT: &str = "#f59e0b";

pub const SIDE_PANEL_WIDTH: f64 = 340.0;
pub const TIMELINE_RULER_HEIGHT: f64 = 22.0;
pub const TIMELINE_LANE_HEIGHT: f64 = 26.0;
pub const TIMELINE_MIN_LANES: usize = 2;
pub const KEYBOARD_SEEK_SECONDS: f64 = 5.0;

pub const VIDEO_ELEMENT_ID: &str = "review-video";
pub const TIMELINE_TRACK_ID: &str = "feedback-timeline-track";

/// Bridge between the `<video>` element and `PlaybackController`.
///
/// Posts `MediaEvent`s, runs a requestAnimationFrame loop only while the
/// element is playing, and executes `MediaCommand`s. `detach` cancels the
/// loop and removes every listener.
pub const MEDIA_BRIDGE_SCRIPT: &str = r#"
const videoId = "review-video";
let video = null;
let frame = null;
let attachTimer = null;
const listeners = [];

function post(msg) {
    dioxus.send(msg);
}

function postTime() {
    if (video && isFinite(video.currentTime)) {
        post({ kind: "time", current_time: video.currentTime });
    }
}

function tick() {
    if (!video || video.paused || video.ended) {
        frame = null;
        return;
    }
    postTime();
    frame = requestAnimationFrame(tick);
}

function startLoop() {
    if (frame === null) {
        frame = requestAnimationFrame(tick);
    }
}

function stopLoop() {
    if (frame !== null) {
        cancelAnimationFrame(frame);
        frame = null;
    }
}

function on(name, handler) {
    video.addEventListener(name, handler);
    listeners.push([name, handler]);
}

function describeError() {
    const err = video && video.error;
    if (!err) {
        return "The video could not be played.";
    }
    const codes = {
        1: "Playback was aborted.",
        2: "A network error interrupted the video.",
        3: "The video could not be decoded.",
        4: "This video format is not supported.",
    };
    return codes[err.code] || err.message || "The video could not be played.";
}

function postMetadata() {
    if (video && isFinite(video.duration) && video.duration > 0) {
        post({ kind: "metadata", duration: video.duration });
    }
}

function attach() {
    attachTimer = null;
    video = document.getElementById(videoId);
    if (!video) {
        attachTimer = setTimeout(attach, 50);
        return;
    }
    on("loadedmetadata", postMetadata);
    on("durationchange", postMetadata);
    on("play", () => { post({ kind: "playing" }); startLoop(); });
    on("pause", () => { stopLoop(); postTime(); post({ kind: "paused" }); });
    on("ended", () => { stopLoop(); post({ kind: "ended" }); });
    on("seeked", postTime);
    on("timeupdate", () => { if (frame === null) { postTime(); } });
    on("error", () => { stopLoop(); post({ kind: "error", message: describeError() }); });
    if (video.readyState >= 1) {
        postMetadata();
    }
}

function detach() {
    stopLoop();
    if (attachTimer !== null) {
        clearTimeout(attachTimer);
        attachTimer = null;
    }
    if (video) {
        for (const [name, handler] of listeners) {
            video.removeEventListener(name, handler);
        }
    }
    listeners.length = 0;
    video = null;
}

attach();

while (true) {
    const cmd = await dioxus.recv();
    if (!cmd) {
        continue;
    }
    if (cmd.kind === "detach") {
        detach();
        break;
    }
    if (!video) {
        continue;
    }
    if (cmd.kind === "play") {
        const pending = video.play();
        if (pending && pending.catch) {
            pending.catch((err) => {
                if (err && err.name === "AbortError") {
                    return;
                }
                post({ kind: "play_rejected", message: String((err && err.message) || err) });
            });
        }
    } else if (cmd.kind === "pause") {
        video.pause();
    } else if (cmd.kind === "seek") {
        video.currentTime = cmd.time;
    }
}
"#;

/// Reports the timeline track's horizontal bounds so pointer positions can be
/// mapped to a fraction of the duration.
pub const TIMELINE_VIEWPORT_SCRIPT: &str = r#"
const hostId = "feedback-timeline-track";
let last = null;

function sendBounds() {
    const host = document.getElementById(hostId);
    if (!host) {
        return;
    }
    const rect = host.getBoundingClientRect();
    if (last && Math.abs(last.left - rect.left) < 0.5 && Math.abs(last.width - rect.width) < 0.5) {
        return;
    }
    last = { left: rect.left, width: rect.width };
    dioxus.send(last);
}

function attach() {
    const host = document.getElementById(hostId);
    if (!host) {
        setTimeout(attach, 100);
        return;
    }
    const observer = new ResizeObserver(() => sendBounds());
    observer.observe(host);
    window.addEventListener("resize", sendBounds, { passive: true });
    sendBounds();
}

attach();
await new Promise(() => {});
"#;
