//! Prompt construction for dialogue generation.
//!
//! The instruction block and few-shot pools are fixed; only the
//! example choice (uniform, conditioned on the label) and the
//! scenario text vary between prompts.

use rand::seq::SliceRandom;

use crate::catalog::{Label, Scenario};

pub const INSTRUCTION: &str = "\
Anda adalah MESIN TRANSKRIPSI OTOMATIS yang sangat akurat. Tugas Anda adalah membuat transkrip percakapan telepon yang 100% bersih berdasarkan konteks.

ATURAN MUTLAK:
1.  Format WAJIB adalah `Nama Peran: Ucapan`. Contoh: `Penipu: Halo`.
2.  JANGAN PERNAH menggunakan format tebal, miring, atau markdown lainnya.
3.  JANGAN PERNAH menulis deskripsi tindakan, emosi, atau pikiran di dalam tanda kurung seperti `(curiga)` atau `(tertawa)`.
4.  JANGAN PERNAH menambahkan deskripsi alias atau sub-peran dalam kurung setelah nama peran. Contoh terlarang: `Penipu (Staf Bank):`.
5.  JANGAN PERNAH menulis paragraf narasi atau ringkasan cerita.
6.  Ucapan karakter HARUS realistis. Karakter tidak boleh 'sadar' mereka dalam dialog atau mengumumkan 'ini penipuan'.
7.  Untuk semua data sensitif gunakan data dummy. Contoh: `08123456789` atau t.co/DummyLink.
Output Anda HARUS sebuah transkrip murni.
";

const FRAUD_EXAMPLES: &[&str] = &[
    "\
### CONTOH
Konteks Skenario: Penipuan Phishing & Malware (APK Paling Viral)
Detail spesifik: Penipu mengaku dari jasa pengiriman (JNE/J&T/Anteraja), mengirim 'foto resi paket' dalam format file .APK.
### DIALOG HASIL:
Penipu: Selamat siang, dengan Ibu Rina?
Korban: Iya benar, ini siapa ya?
Penipu: Saya Budi dari J&T Express, Bu. Mau konfirmasi paket, sepertinya alamat Ibu kurang jelas di sistem kami.
Korban: Oh ya? Perasaan alamat saya sudah benar.
Penipu: Untuk memastikan, bisa saya kirimkan foto paket dan resinya via WhatsApp Bu? Biar tidak salah kirim.
Korban: Boleh, Mas. Kirim saja.
Penipu: Baik, sudah saya kirim ya Bu. Filenya dalam bentuk aplikasi Lihat Resi, mohon di-install dulu Bu untuk melihat fotonya.
Korban: Loh kok aplikasi? Bukan foto biasa?
Penipu: Iya Bu, ini sistem keamanan baru dari pusat. Lebih aman katanya. Ditunggu ya Bu konfirmasinya.
Korban: Hmm ya sudah saya coba.",
    "\
### CONTOH
Konteks Skenario: Penipuan Perbankan (Modus Klasik & Baru)
Detail spesifik: Penipu menyamar sebagai staf bank (BCA), mengabarkan ada 'perubahan tarif transfer menjadi Rp150.000/bulan'.
### DIALOG HASIL:
Penipu: Selamat pagi, kami dari HaloBCA. Berbicara dengan Bapak Wijoyo?
Korban: Pagi. Iya, saya sendiri.
Penipu: Baik Bapak Wijoyo, kami informasikan sesuai kebijakan baru Bank Indonesia, per besok biaya transaksi bulanan Bapak akan berubah menjadi seratus lima puluh ribu rupiah per bulan.
Korban: Hah? Kok mahal sekali? Saya tidak mau.
Penipu: Kami paham, Pak. Jika Bapak tidak setuju dan ingin tetap menggunakan skema tarif lama, Bapak bisa mengisi formulir pembatalan online. Linknya sudah kami kirimkan via SMS, Pak.
Korban: Oh ada linknya? Oke oke saya isi.
Penipu: Silakan diisi segera ya Pak, karena formulir hanya valid selama 10 menit. Nanti akan ada kode yang masuk ke HP Bapak, mohon diinformasikan ke kami untuk verifikasi.
Korban: Oke, saya cek SMSnya.",
    "\
### CONTOH
Konteks Skenario: Penipuan Lowongan Kerja Fiktif (Part-Time & Remote)
Detail spesifik: Penipu menawarkan pekerjaan paruh waktu mudah seperti 'Like & Subscribe YouTube'.
### DIALOG HASIL:
Penipu: Halo kak, perkenalkan saya Siska dari Digital Media. Kami sedang butuh partner untuk kerja sampingan, hanya like dan subscribe channel YouTube saja. Komisinya 50 ribu per tugas, tertarik?
Korban: Oh ya? Kerjanya gimana tuh?
Penipu: Gampang kak, nanti saya kasih link channelnya. Kakak cukup like, subscribe, terus screenshot kirim ke saya. Nanti komisi langsung cair.
Korban: Wah, enak banget. Boleh deh.
Penipu: Oke. Untuk 3 tugas pertama gratis kak. Tapi untuk bisa ambil tugas selanjutnya dengan komisi lebih besar, kakak perlu upgrade keanggotaan premium dengan deposit 200 ribu. Nanti uangnya kembali kok setelah 10 tugas.
Korban: Oh harus deposit dulu ya?
Penipu: Iya kak, untuk jaminan saja. Semua member premium juga begitu kok. Mau dicoba kak?",
];

const LEGIT_EXAMPLES: &[&str] = &[
    "\
### CONTOH
Konteks Skenario: Layanan Pesan Antar Makanan & Transportasi Online
Detail spesifik: Driver Gojek/Grab mengonfirmasi alamat pengantaran dan patokannya kepada pelanggan.
### DIALOG HASIL:
Penelepon: Halo, selamat siang. Saya driver Gojek, sudah di titik jemput ya, Pak. Di depan Indomaret.
Penerima: Oh iya, Mas. Saya sudah lihat. Pakai jaket hijau kan?
Penelepon: Betul, Pak. Saya di dekat motor Vario hitam.
Penerima: Oke, saya ke sana sekarang. Tunggu sebentar ya.
Penelepon: Siap, Pak. Ditunggu.",
    "\
### CONTOH
Konteks Skenario: Layanan Janji Temu (Appointment)
Detail spesifik: Resepsionis klinik mengingatkan jadwal janji temu dengan dokter gigi kepada pasien.
### DIALOG HASIL:
Penelepon: Selamat sore, Klinik Gigi Sehat. Bisa bicara dengan Ibu Amanda?
Penerima: Sore, iya saya sendiri.
Penelepon: Ibu Amanda, saya hanya ingin mengingatkan untuk jadwal scaling gigi Ibu dengan Dokter Wira besok jam 3 sore ya.
Penerima: Oh iya betul, Mbak. Terima kasih sudah diingatkan.
Penelepon: Baik, Bu. Diharapkan datang 15 menit lebih awal untuk registrasi ya.
Penerima: Siap, Mbak. Terima kasih.
Penelepon: Sama-sama, Bu. Selamat sore.",
];

pub fn build(scenario: &Scenario) -> String {
    let pool = match scenario.label {
        Label::Fraud => FRAUD_EXAMPLES,
        Label::Legit => LEGIT_EXAMPLES,
    };
    let mut rng = rand::thread_rng();
    // Pools are non-empty consts, so choose cannot return None.
    let example = pool.choose(&mut rng).copied().unwrap_or(pool[0]);

    format!(
        "{INSTRUCTION}\n{example}\n\n### TUGAS BARU\nKonteks Skenario: {}\nDetail spesifik: {}\n### DIALOG HASIL:\n",
        scenario.category, scenario.detail
    )
}
