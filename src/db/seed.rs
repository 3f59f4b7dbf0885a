/// The mood labels the catalog covers.
pub const MOODS: [&str; 5] = ["Happy", "Sad", "Angry", "Depressed", "Calm"];

/// One catalog entry. Cover art and link are both derived from the YouTube id.
#[derive(Debug, Clone, Copy)]
pub struct SeedSong {
    pub title: &'static str,
    pub artist: &'static str,
    pub mood: &'static str,
    pub video_id: &'static str,
}

impl SeedSong {
    const fn new(
        title: &'static str,
        artist: &'static str,
        mood: &'static str,
        video_id: &'static str,
    ) -> Self {
        Self {
            title,
            artist,
            mood,
            video_id,
        }
    }

    pub fn cover_url(&self) -> String {
        format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", self.video_id)
    }

    pub fn youtube_link(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

pub const CATALOG: &[SeedSong] = &[
    SeedSong::new("Happy", "Pharrell Williams", "Happy", "ZbZSe6N_BXs"),
    SeedSong::new("Good as Hell", "Lizzo", "Happy", "SmbmeOgWsqE"),
    SeedSong::new("Uptown Funk", "Mark Ronson ft. Bruno Mars", "Happy", "OPf0YbXqDm0"),
    SeedSong::new("Can't Stop the Feeling", "Justin Timberlake", "Happy", "ru0K8uYEZWw"),
    SeedSong::new("Walking on Sunshine", "Katrina and the Waves", "Happy", "iPUmE-tne5U"),
    SeedSong::new("Someone Like You", "Adele", "Sad", "hLQl3WQQoQ0"),
    SeedSong::new("Hello", "Adele", "Sad", "YQHsXMglC9A"),
    SeedSong::new("The Sound of Silence", "Disturbed", "Sad", "u9Dg-g7t2l4"),
    SeedSong::new("Mad World", "Gary Jules", "Sad", "4N3N1MlvVc4"),
    SeedSong::new("Hurt", "Johnny Cash", "Sad", "8AHCfZTRGiI"),
    SeedSong::new("Break Stuff", "Limp Bizkit", "Angry", "ZpUYjpKg9KY"),
    SeedSong::new("Bodies", "Drowning Pool", "Angry", "04F4xlWSFh0"),
    SeedSong::new("Chop Suey", "System of a Down", "Angry", "CSvFpBOe8eY"),
    SeedSong::new("In the End", "Linkin Park", "Angry", "eVTXPUF4Oz4"),
    SeedSong::new("Killing in the Name", "Rage Against the Machine", "Angry", "bWXazVhlyxQ"),
    SeedSong::new("Breathe Me", "Sia", "Depressed", "hSjIz8oQuko"),
    SeedSong::new("Heavy", "Linkin Park ft. Kiiara", "Depressed", "5dmQ3QWpy1Q"),
    SeedSong::new("Numb", "Linkin Park", "Depressed", "kXYiU_JCYtU"),
    SeedSong::new("Boulevard of Broken Dreams", "Green Day", "Depressed", "Soa3gO7tL-c"),
    SeedSong::new("Fade to Black", "Metallica", "Depressed", "WEQnzs8wl6E"),
    SeedSong::new("Weightless", "Marconi Union", "Calm", "UfcAVejslrU"),
    SeedSong::new("Clair de Lune", "Claude Debussy", "Calm", "CvFH_6DNRCY"),
    SeedSong::new("Holocene", "Bon Iver", "Calm", "TWcyIpul8OE"),
    SeedSong::new("The Night We Met", "Lord Huron", "Calm", "KtlgYxa6BMU"),
    SeedSong::new("Skinny Love", "Bon Iver", "Calm", "ssdgFoHLwnk"),
];
